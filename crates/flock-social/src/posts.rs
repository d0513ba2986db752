use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use flock_db::Database;
use flock_db::models::{PostOrder, PostRow};
use flock_types::api::{CreatePostRequest, UpdatePostRequest};
use flock_types::models::{Page, PostView, Principal};

use crate::convert;
use crate::error::{SocialError, SocialResult};
use crate::pagination::PageRequest;
use crate::permissions::{can_read, can_write};

const MAX_TITLE_LEN: usize = 200;
const MAX_CONTENT_LEN: usize = 10_000;

/// Listing filters for `Posts::list`.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub search: Option<String>,
    /// One of `created_at`, `-created_at`, `title`, `-title`.
    pub ordering: Option<String>,
    pub page: PageRequest,
}

#[derive(Clone)]
pub struct Posts {
    db: Arc<Database>,
}

impl Posts {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(&self, author: &Principal, req: CreatePostRequest) -> SocialResult<PostView> {
        let title = req.title.trim();
        validate_title(title)?;
        validate_content(&req.content)?;

        let id = Uuid::new_v4();
        self.db
            .insert_post(&id.to_string(), &author.id.to_string(), title, &req.content)?;
        info!("{} created post {}", author.username, id);

        self.get(Some(author), id)
    }

    pub fn get(&self, principal: Option<&Principal>, id: Uuid) -> SocialResult<PostView> {
        let row = self.resolve(id)?;
        if !can_read(principal, &row) {
            return Err(SocialError::Forbidden);
        }
        Ok(convert::post_view(row))
    }

    pub fn list(&self, query: &PostQuery) -> SocialResult<Page<PostView>> {
        let order = match query.ordering.as_deref() {
            None | Some("") => PostOrder::default(),
            Some(s) => PostOrder::parse(s)
                .ok_or_else(|| SocialError::Validation(format!("Invalid ordering '{}'.", s)))?,
        };
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let count = self.db.count_posts(search)?;
        let rows = self
            .db
            .list_posts(search, order, query.page.size(), query.page.offset())?;

        Ok(query
            .page
            .into_page(count, rows.into_iter().map(convert::post_view).collect()))
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        req: UpdatePostRequest,
    ) -> SocialResult<PostView> {
        let row = self.resolve(id)?;
        if !can_write(Some(principal), &row) {
            return Err(SocialError::Forbidden);
        }

        let title = req.title.as_deref().map(str::trim);
        if let Some(title) = title {
            validate_title(title)?;
        }
        if let Some(content) = req.content.as_deref() {
            validate_content(content)?;
        }

        if !self.db.update_post(&row.id, title, req.content.as_deref())? {
            return Err(SocialError::NotFound("Post"));
        }
        info!("{} updated post {}", principal.username, row.id);

        self.get(Some(principal), id)
    }

    pub fn delete(&self, principal: &Principal, id: Uuid) -> SocialResult<()> {
        let row = self.resolve(id)?;
        if !can_write(Some(principal), &row) {
            return Err(SocialError::Forbidden);
        }

        if !self.db.delete_post(&row.id)? {
            return Err(SocialError::NotFound("Post"));
        }
        info!("{} deleted post {}", principal.username, row.id);
        Ok(())
    }

    fn resolve(&self, id: Uuid) -> SocialResult<PostRow> {
        self.db
            .get_post(&id.to_string())?
            .ok_or(SocialError::NotFound("Post"))
    }
}

fn validate_title(title: &str) -> SocialResult<()> {
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(SocialError::Validation(format!(
            "Title must be between 1 and {} characters.",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> SocialResult<()> {
    if content.trim().is_empty() || content.chars().count() > MAX_CONTENT_LEN {
        return Err(SocialError::Validation(format!(
            "Content must be between 1 and {} characters.",
            MAX_CONTENT_LEN
        )));
    }
    Ok(())
}
