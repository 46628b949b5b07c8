use crate::models::Blog;
use crate::server::error::AppError;
use crate::server::AppContext;
use awesome_common::Error;
use awesome_orm::pool::get_conn;
use awesome_orm::{FindOptions, FromValue, Limit, Model};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

const MAX_PAGE_SIZE: u32 = 100;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/blogs", get(list_blogs))
        .route("/blogs/{id}", get(get_blog))
}

#[derive(Debug, Deserialize)]
struct ListBlogsQuery {
    page: Option<u32>,
    size: Option<u32>,
}

#[derive(Debug, Serialize)]
struct BlogPage {
    total: i64,
    page: u32,
    size: u32,
    blogs: Vec<Blog>,
}

/// GET /api/blogs - newest blogs first, one page at a time.
async fn list_blogs(
    State(ctx): State<AppContext>,
    Query(params): Query<ListBlogsQuery>,
) -> Result<Json<BlogPage>, AppError> {
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(Error::invalid_input("page starts at 1").into());
    }
    let size = params
        .size
        .unwrap_or(ctx.config.server.page_size)
        .clamp(1, MAX_PAGE_SIZE);

    let conn = get_conn(&ctx.db)?;
    let total = Blog::find_number(&conn, "count(id)", None, &[])?
        .map(|num| i64::from_value(&num))
        .transpose()?
        .unwrap_or(0);

    let offset = (page - 1).saturating_mul(size);
    let blogs = if i64::from(offset) >= total {
        Vec::new()
    } else {
        let options = FindOptions::new()
            .order_by("`created_at` desc")
            .limit(Limit::Range(offset, size));
        Blog::find_all(&conn, &options)?
    };

    Ok(Json(BlogPage {
        total,
        page,
        size,
        blogs,
    }))
}

/// GET /api/blogs/{id}
async fn get_blog(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, AppError> {
    let conn = get_conn(&ctx.db)?;
    let blog = Blog::find(&conn, id.as_str())?
        .ok_or_else(|| Error::not_found(format!("blog {}", id)))?;
    Ok(Json(blog))
}
