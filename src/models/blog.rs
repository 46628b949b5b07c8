use awesome_common::Result;
use awesome_orm::{Field, Model, Record, Value};
use serde::{Deserialize, Serialize};

use super::{assign, id_default, now_default, unknown_field};

/// A blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_image: String,
    pub name: String,
    pub summary: String,
    pub content: String,
    pub created_at: Option<f64>,
}

impl Model for Blog {
    const NAME: &'static str = "Blog";

    fn table() -> Option<&'static str> {
        Some("blogs")
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
            ("user_id", Field::string().ddl("varchar(50)")),
            ("user_name", Field::string().ddl("varchar(50)")),
            ("user_image", Field::string().ddl("varchar(500)")),
            ("name", Field::string().ddl("varchar(50)")),
            ("summary", Field::string().ddl("varchar(200)")),
            ("content", Field::text()),
            ("created_at", Field::float().default_with(now_default)),
        ]
    }

    fn get(&self, attr: &str) -> Value {
        match attr {
            "id" => self.id.clone().into(),
            "user_id" => self.user_id.clone().into(),
            "user_name" => self.user_name.clone().into(),
            "user_image" => self.user_image.clone().into(),
            "name" => self.name.clone().into(),
            "summary" => self.summary.clone().into(),
            "content" => self.content.clone().into(),
            "created_at" => self.created_at.into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, attr: &str, value: Value) -> Result<()> {
        match attr {
            "id" => assign(&mut self.id, &value),
            "user_id" => assign(&mut self.user_id, &value),
            "user_name" => assign(&mut self.user_name, &value),
            "user_image" => assign(&mut self.user_image, &value),
            "name" => assign(&mut self.name, &value),
            "summary" => assign(&mut self.summary, &value),
            "content" => assign(&mut self.content, &value),
            "created_at" => assign(&mut self.created_at, &value),
            other => Err(unknown_field(Self::NAME, other)),
        }
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.value("id")?,
            user_id: record.value("user_id")?,
            user_name: record.value("user_name")?,
            user_image: record.value("user_image")?,
            name: record.value("name")?,
            summary: record.value("summary")?,
            content: record.value("content")?,
            created_at: record.value("created_at")?,
        })
    }
}
