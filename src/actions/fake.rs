use crate::api::{ApiError, ApiResult, PostsBackend};
use crate::models::{Post, PostId, PostPayload};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory backend that counts calls and can be told to fail.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub posts: RefCell<BTreeMap<PostId, Post>>,
    pub next_id: Cell<PostId>,
    pub calls: Cell<usize>,
    pub failure: RefCell<Option<ApiError>>,
    pub last_payload: RefCell<Option<PostPayload>>,
}

impl FakeBackend {
    pub fn with_posts(posts: &[(PostId, &str, &str)]) -> Self {
        let b = Self::default();
        for (id, title, content) in posts {
            b.posts.borrow_mut().insert(*id, post(*id, title, content));
            b.next_id.set(b.next_id.get().max(*id));
        }
        b
    }

    pub fn fail_with(&self, e: ApiError) {
        *self.failure.borrow_mut() = Some(e);
    }

    fn enter(&self) -> ApiResult<()> {
        self.calls.set(self.calls.get() + 1);
        match self.failure.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::from_status(404, "")
    }
}

impl PostsBackend for FakeBackend {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.enter()?;
        Ok(self.posts.borrow().values().cloned().collect())
    }

    async fn get_post(&self, id: PostId) -> ApiResult<Post> {
        self.enter()?;
        self.posts.borrow().get(&id).cloned().ok_or_else(Self::not_found)
    }

    async fn create_post(&self, payload: &PostPayload) -> ApiResult<Post> {
        self.enter()?;
        *self.last_payload.borrow_mut() = Some(payload.clone());
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let created = post(id, &payload.title, &payload.content);
        self.posts.borrow_mut().insert(id, created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: PostId, payload: &PostPayload) -> ApiResult<Post> {
        self.enter()?;
        *self.last_payload.borrow_mut() = Some(payload.clone());
        let mut posts = self.posts.borrow_mut();
        let existing = posts.get_mut(&id).ok_or_else(Self::not_found)?;
        existing.title = payload.title.clone();
        existing.content = payload.body.clone();
        Ok(existing.clone())
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.enter()?;
        self.posts.borrow_mut().remove(&id).map(|_| ()).ok_or_else(Self::not_found)
    }
}

pub(crate) fn post(id: PostId, title: &str, content: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        category_id: None,
        is_active: None,
        created_at: None,
        updated_at: None,
    }
}
