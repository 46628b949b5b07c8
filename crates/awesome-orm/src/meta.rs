//! Model metadata: field scanning, primary key inference, and SQL template
//! synthesis.
//!
//! A [`ModelMeta`] is built once per model type from its declared fields.
//! All templates use `?` placeholders and backtick-quoted identifiers.

use awesome_common::{Error, Result};

use crate::field::Field;

/// Render `n` comma-separated `?` placeholders.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Quote an identifier with backticks.
fn quote(ident: &str) -> String {
    format!("`{}`", ident)
}

/// Everything the ORM knows about one model type.
#[derive(Debug, Clone)]
pub struct ModelMeta {
    name: String,
    table: String,
    mappings: Vec<(String, Field)>,
    primary_key: String,
    fields: Vec<String>,
    select: String,
    insert: String,
    update: String,
    delete: String,
    create_table: String,
}

impl ModelMeta {
    /// Scan `fields`, infer the primary key, and synthesize SQL templates.
    ///
    /// The table name defaults to `name` when `table` is `None`.
    pub fn build(
        name: &str,
        table: Option<&str>,
        fields: Vec<(&'static str, Field)>,
    ) -> Result<Self> {
        let table = table.unwrap_or(name).to_string();
        tracing::info!("found model: {} (table: {})", name, table);

        let mut mappings: Vec<(String, Field)> = Vec::with_capacity(fields.len());
        let mut primary_key: Option<String> = None;
        let mut plain = Vec::new();

        for (attr, field) in fields {
            if mappings.iter().any(|(existing, _)| existing == attr) {
                return Err(Error::model(format!("Duplicate field: {}", attr)));
            }
            tracing::info!("found mapping: {} ==> {}", attr, field);
            if field.is_primary_key() {
                if primary_key.is_some() {
                    return Err(Error::model(format!(
                        "Duplicate primary key for field: {}",
                        attr
                    )));
                }
                if !field.kind().can_be_primary_key() {
                    return Err(Error::model(format!(
                        "{} cannot be a primary key: {}",
                        field.kind(),
                        attr
                    )));
                }
                primary_key = Some(attr.to_string());
            } else {
                plain.push(attr.to_string());
            }
            mappings.push((attr.to_string(), field));
        }

        let primary_key = primary_key.ok_or_else(|| Error::model("Primary key not found."))?;

        let mut meta = Self {
            name: name.to_string(),
            table,
            mappings,
            primary_key,
            fields: plain,
            select: String::new(),
            insert: String::new(),
            update: String::new(),
            delete: String::new(),
            create_table: String::new(),
        };
        meta.synthesize();
        Ok(meta)
    }

    fn synthesize(&mut self) {
        let table = quote(&self.table);
        let pk_col = quote(self.column(&self.primary_key));

        let selected: Vec<String> = std::iter::once(&self.primary_key)
            .chain(self.fields.iter())
            .map(|attr| {
                let column = self.column(attr);
                if column == attr.as_str() {
                    quote(column)
                } else {
                    format!("{} as {}", quote(column), quote(attr))
                }
            })
            .collect();
        self.select = format!("select {} from {}", selected.join(", "), table);

        let plain_cols: Vec<String> = self
            .fields
            .iter()
            .map(|attr| quote(self.column(attr)))
            .collect();
        let insert_cols: Vec<String> = plain_cols
            .iter()
            .cloned()
            .chain(std::iter::once(pk_col.clone()))
            .collect();
        self.insert = format!(
            "insert into {} ({}) values ({})",
            table,
            insert_cols.join(", "),
            placeholders(insert_cols.len())
        );

        let assignments: Vec<String> = plain_cols.iter().map(|c| format!("{}=?", c)).collect();
        self.update = format!(
            "update {} set {} where {}=?",
            table,
            assignments.join(", "),
            pk_col
        );

        self.delete = format!("delete from {} where {}=?", table, pk_col);

        let mut columns: Vec<String> = self
            .mappings
            .iter()
            .map(|(attr, field)| {
                let column = quote(self.column(attr));
                if field.is_primary_key() {
                    format!("{} {} not null", column, field.column_type())
                } else {
                    format!("{} {}", column, field.column_type())
                }
            })
            .collect();
        columns.push(format!("primary key ({})", pk_col));
        self.create_table = format!(
            "create table if not exists {} ({})",
            table,
            columns.join(", ")
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// All attributes with their fields, in declaration order.
    pub fn mappings(&self) -> &[(String, Field)] {
        &self.mappings
    }

    pub fn field(&self, attr: &str) -> Option<&Field> {
        self.mappings
            .iter()
            .find(|(name, _)| name == attr)
            .map(|(_, field)| field)
    }

    /// Column backing `attr`: the field's name override, else the attribute.
    pub fn column<'a>(&'a self, attr: &'a str) -> &'a str {
        self.field(attr)
            .and_then(Field::column_name)
            .unwrap_or(attr)
    }

    /// Primary key attribute.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Non-key attributes, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn select_sql(&self) -> &str {
        &self.select
    }

    pub fn insert_sql(&self) -> &str {
        &self.insert
    }

    pub fn update_sql(&self) -> &str {
        &self.update
    }

    pub fn delete_sql(&self) -> &str {
        &self.delete
    }

    pub fn create_table_sql(&self) -> &str {
        &self.create_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_fields() -> Vec<(&'static str, Field)> {
        vec![
            ("id", Field::string().primary_key().ddl("varchar(50)")),
            ("email", Field::string().ddl("varchar(50)")),
            ("admin", Field::boolean()),
            ("created_at", Field::float()),
        ]
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }

    #[test]
    fn test_templates() {
        let meta = ModelMeta::build("User", Some("users"), user_fields()).unwrap();

        assert_eq!(meta.table(), "users");
        assert_eq!(meta.primary_key(), "id");
        assert_eq!(meta.fields(), &["email", "admin", "created_at"]);
        assert_eq!(
            meta.select_sql(),
            "select `id`, `email`, `admin`, `created_at` from `users`"
        );
        assert_eq!(
            meta.insert_sql(),
            "insert into `users` (`email`, `admin`, `created_at`, `id`) values (?, ?, ?, ?)"
        );
        assert_eq!(
            meta.update_sql(),
            "update `users` set `email`=?, `admin`=?, `created_at`=? where `id`=?"
        );
        assert_eq!(meta.delete_sql(), "delete from `users` where `id`=?");
        assert_eq!(
            meta.create_table_sql(),
            "create table if not exists `users` (`id` varchar(50) not null, `email` varchar(50), \
             `admin` boolean, `created_at` real, primary key (`id`))"
        );
    }

    #[test]
    fn test_table_defaults_to_model_name() {
        let meta = ModelMeta::build("User", None, user_fields()).unwrap();
        assert_eq!(meta.table(), "User");
        assert_eq!(meta.delete_sql(), "delete from `User` where `id`=?");
    }

    #[test]
    fn test_primary_key_not_first() {
        let fields = vec![
            ("name", Field::string()),
            ("code", Field::integer().primary_key()),
        ];
        let meta = ModelMeta::build("Tag", Some("tags"), fields).unwrap();
        assert_eq!(meta.primary_key(), "code");
        assert_eq!(meta.select_sql(), "select `code`, `name` from `tags`");
        assert_eq!(
            meta.insert_sql(),
            "insert into `tags` (`name`, `code`) values (?, ?)"
        );
    }

    #[test]
    fn test_column_override_is_used_everywhere() {
        let fields = vec![
            ("id", Field::string().primary_key()),
            ("title", Field::string().name("blog_title")),
        ];
        let meta = ModelMeta::build("Post", Some("posts"), fields).unwrap();
        assert_eq!(meta.column("title"), "blog_title");
        assert_eq!(
            meta.select_sql(),
            "select `id`, `blog_title` as `title` from `posts`"
        );
        assert_eq!(
            meta.insert_sql(),
            "insert into `posts` (`blog_title`, `id`) values (?, ?)"
        );
        assert_eq!(
            meta.update_sql(),
            "update `posts` set `blog_title`=? where `id`=?"
        );
    }

    #[test]
    fn test_missing_primary_key() {
        let fields = vec![("name", Field::string())];
        let err = ModelMeta::build("Tag", None, fields).unwrap_err();
        assert_eq!(err.to_string(), "Model error: Primary key not found.");
    }

    #[test]
    fn test_duplicate_primary_key() {
        let fields = vec![
            ("id", Field::string().primary_key()),
            ("code", Field::integer().primary_key()),
        ];
        let err = ModelMeta::build("Tag", None, fields).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Model error: Duplicate primary key for field: code"
        );
    }

    #[test]
    fn test_duplicate_field() {
        let fields = vec![
            ("id", Field::string().primary_key()),
            ("name", Field::string()),
            ("name", Field::text()),
        ];
        let err = ModelMeta::build("Tag", None, fields).unwrap_err();
        assert_eq!(err.to_string(), "Model error: Duplicate field: name");
    }

    #[test]
    fn test_boolean_primary_key_rejected() {
        let fields = vec![("flag", Field::boolean().primary_key())];
        let err = ModelMeta::build("Flag", None, fields).unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }

    #[test]
    fn test_only_primary_key() {
        let fields = vec![("id", Field::integer().primary_key())];
        let meta = ModelMeta::build("Seq", Some("seq"), fields).unwrap();
        assert_eq!(meta.select_sql(), "select `id` from `seq`");
        assert_eq!(meta.insert_sql(), "insert into `seq` (`id`) values (?)");
    }
}
