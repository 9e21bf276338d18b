//! Idempotent startup DDL plus default-category seeding. There is no
//! migration history; every statement is safe to re-run.

use diesel::ExpressionMethods;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::info;

use crate::schema::categories;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR NOT NULL UNIQUE,
    email VARCHAR NOT NULL UNIQUE,
    password_hash VARCHAR NOT NULL,
    avatar TEXT,
    bio TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR NOT NULL UNIQUE,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// category deletion orphans nothing: posts fall back to NULL.
const CREATE_POSTS: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id SERIAL PRIMARY KEY,
    title VARCHAR NOT NULL,
    content TEXT NOT NULL,
    excerpt TEXT,
    featured_image TEXT,
    author_id INTEGER NOT NULL REFERENCES users (id),
    category_id INTEGER REFERENCES categories (id) ON DELETE SET NULL,
    status VARCHAR NOT NULL DEFAULT 'published',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// deleting a post (or a parent comment) takes the thread with it.
const CREATE_COMMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id SERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users (id),
    post_id INTEGER NOT NULL REFERENCES posts (id) ON DELETE CASCADE,
    parent_id INTEGER REFERENCES comments (id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Technology", "Posts about technology and programming"),
    ("Lifestyle", "Posts about lifestyle and personal experiences"),
    ("Travel", "Posts about travel and adventures"),
    ("Food", "Posts about food and cooking"),
];

pub async fn run_migrations(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    for ddl in [CREATE_USERS, CREATE_CATEGORIES, CREATE_POSTS, CREATE_COMMENTS] {
        diesel::sql_query(ddl).execute(conn).await?;
    }

    let seeded = diesel::insert_into(categories::table)
        .values(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(name, description)| {
                    (
                        categories::name.eq(*name),
                        categories::description.eq(*description),
                    )
                })
                .collect::<Vec<_>>(),
        )
        .on_conflict(categories::name)
        .do_nothing()
        .execute(conn)
        .await?;

    info!(seeded_categories = seeded, "Database schema ready");

    Ok(())
}
