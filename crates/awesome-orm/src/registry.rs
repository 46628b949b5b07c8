//! Per-type cache of [`ModelMeta`].
//!
//! Metadata is built the first time a model type is used and shared after
//! that. A model whose declaration is invalid is never cached, so every use
//! reports the same definition error.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use awesome_common::Result;
use parking_lot::RwLock;

use crate::meta::ModelMeta;
use crate::model::Model;

type Registry = RwLock<HashMap<TypeId, Arc<ModelMeta>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Default::default)
}

/// Metadata for `M`, building and caching it on first use.
pub fn meta<M: Model>() -> Result<Arc<ModelMeta>> {
    let key = TypeId::of::<M>();
    if let Some(meta) = registry().read().get(&key) {
        return Ok(Arc::clone(meta));
    }

    let built = Arc::new(ModelMeta::build(M::NAME, M::table(), M::fields())?);
    let mut cache = registry().write();
    Ok(Arc::clone(cache.entry(key).or_insert(built)))
}

/// Build metadata for `M` now so declaration errors surface early.
pub fn register<M: Model>() -> Result<()> {
    meta::<M>().map(|_| ())
}

/// Whether metadata for `M` has been built.
pub fn is_registered<M: Model>() -> bool {
    registry().read().contains_key(&TypeId::of::<M>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::record::Record;
    use crate::value::Value;
    use awesome_common::Error;

    struct Tag;

    impl Model for Tag {
        const NAME: &'static str = "Tag";

        fn fields() -> Vec<(&'static str, Field)> {
            vec![("id", Field::integer().primary_key())]
        }

        fn get(&self, _attr: &str) -> Value {
            Value::Null
        }

        fn set(&mut self, _attr: &str, _value: Value) -> Result<()> {
            Ok(())
        }

        fn from_record(_record: &Record) -> Result<Self> {
            Ok(Tag)
        }
    }

    struct Broken;

    impl Model for Broken {
        const NAME: &'static str = "Broken";

        fn fields() -> Vec<(&'static str, Field)> {
            vec![("name", Field::string())]
        }

        fn get(&self, _attr: &str) -> Value {
            Value::Null
        }

        fn set(&mut self, _attr: &str, _value: Value) -> Result<()> {
            Ok(())
        }

        fn from_record(_record: &Record) -> Result<Self> {
            Ok(Broken)
        }
    }

    #[test]
    fn test_meta_is_cached() {
        let first = meta::<Tag>().unwrap();
        let second = meta::<Tag>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(is_registered::<Tag>());
    }

    #[test]
    fn test_invalid_model_not_cached() {
        let err = register::<Broken>().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
        assert!(!is_registered::<Broken>());
        assert!(register::<Broken>().is_err());
    }
}
