//! Wire representations exchanged with the remote JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::{Post, PostDraft, PostId};

/// A post as serialised by the remote collection.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct PostDto {
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        Self {
            id: PostId::new(dto.id),
            title: dto.title,
            body: dto.body,
        }
    }
}

/// Request body for post creation.
#[derive(Debug, Clone, Serialize)]
pub(super) struct CreatePostDto<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> From<&'a PostDraft> for CreatePostDto<'a> {
    fn from(draft: &'a PostDraft) -> Self {
        Self {
            title: draft.title(),
            body: draft.body(),
        }
    }
}
