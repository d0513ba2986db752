use std::sync::Arc;

use uuid::Uuid;

use flock_db::Database;
use flock_db::models::{NewUser, UserInsert};
use flock_types::api::CreatePostRequest;
use flock_types::models::{PostView, Principal};

use crate::Social;

pub(crate) fn social() -> (Arc<Database>, Social) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let social = Social::new(db.clone());
    (db, social)
}

pub(crate) fn user(db: &Database, username: &str) -> Principal {
    let id = Uuid::new_v4();
    let outcome = db
        .create_user(&NewUser {
            id: &id.to_string(),
            username,
            email: None,
            password_hash: "not-a-hash",
            bio: "",
            profile_picture: None,
        })
        .unwrap();
    assert_eq!(outcome, UserInsert::Created);
    Principal {
        id,
        username: username.to_string(),
    }
}

pub(crate) fn post(social: &Social, author: &Principal, title: &str) -> PostView {
    social
        .posts
        .create(
            author,
            CreatePostRequest {
                title: title.to_string(),
                content: format!("{title} body"),
            },
        )
        .unwrap()
}
