use awesome_common::Result;
use awesome_orm::{Field, Model, Record, Value};
use serde::{Deserialize, Serialize};

use super::{assign, id_default, now_default, unknown_field};

/// A registered user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub passwd: String,
    pub admin: bool,
    pub name: String,
    pub image: String,
    pub created_at: Option<f64>,
}

impl Model for User {
    const NAME: &'static str = "User";

    fn table() -> Option<&'static str> {
        Some("users")
    }

    fn fields() -> Vec<(&'static str, Field)> {
        vec![
            (
                "id",
                Field::string()
                    .primary_key()
                    .default_with(id_default)
                    .ddl("varchar(50)"),
            ),
            ("email", Field::string().ddl("varchar(50)")),
            ("passwd", Field::string().ddl("varchar(50)")),
            ("admin", Field::boolean()),
            ("name", Field::string().ddl("varchar(50)")),
            ("image", Field::string().ddl("varchar(500)")),
            ("created_at", Field::float().default_with(now_default)),
        ]
    }

    fn get(&self, attr: &str) -> Value {
        match attr {
            "id" => self.id.clone().into(),
            "email" => self.email.clone().into(),
            "passwd" => self.passwd.clone().into(),
            "admin" => self.admin.into(),
            "name" => self.name.clone().into(),
            "image" => self.image.clone().into(),
            "created_at" => self.created_at.into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, attr: &str, value: Value) -> Result<()> {
        match attr {
            "id" => assign(&mut self.id, &value),
            "email" => assign(&mut self.email, &value),
            "passwd" => assign(&mut self.passwd, &value),
            "admin" => assign(&mut self.admin, &value),
            "name" => assign(&mut self.name, &value),
            "image" => assign(&mut self.image, &value),
            "created_at" => assign(&mut self.created_at, &value),
            other => Err(unknown_field(Self::NAME, other)),
        }
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.value("id")?,
            email: record.value("email")?,
            passwd: record.value("passwd")?,
            admin: record.value("admin")?,
            name: record.value("name")?,
            image: record.value("image")?,
            created_at: record.value("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awesome_orm::pool::{get_conn, init_memory_pool};

    fn sample() -> User {
        User {
            email: "test@example.com".to_string(),
            passwd: "1234567890".to_string(),
            name: "Test".to_string(),
            image: "about:blank".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_templates() {
        let meta = User::meta().unwrap();
        assert_eq!(meta.table(), "users");
        assert_eq!(meta.primary_key(), "id");
        assert_eq!(
            meta.select_sql(),
            "select `id`, `email`, `passwd`, `admin`, `name`, `image`, `created_at` from `users`"
        );
        assert_eq!(
            meta.insert_sql(),
            "insert into `users` (`email`, `passwd`, `admin`, `name`, `image`, `created_at`, `id`) \
             values (?, ?, ?, ?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_save_fills_id_and_created_at() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        User::create_table(&conn).unwrap();

        let mut user = sample();
        user.save(&conn).unwrap();

        let id = user.id.clone().unwrap();
        assert_eq!(id.len(), 50);
        assert!(user.created_at.is_some());

        let found = User::find(&conn, id.as_str()).unwrap().unwrap();
        assert_eq!(found, user);
    }

    #[test]
    fn test_passwd_not_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("passwd").is_none());
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_set_unknown_field() {
        let mut user = sample();
        assert!(user.set("nickname", Value::from("x")).is_err());
        assert!(user.set("admin", Value::from("yes")).is_err());
        user.set("admin", Value::Integer(1)).unwrap();
        assert!(user.admin);
    }
}
