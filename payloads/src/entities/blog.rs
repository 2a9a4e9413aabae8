use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
    pub published: bool,
    pub created_at: Option<String>,
}

impl Resource for BlogPost {
    const LABEL: &'static str = "blog post";
    const LIST: &'static str = "blog/all";
    const ID_KEYS: &'static [&'static str] = &["blog_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            title: raw.text_or(&["title"], ""),
            content: raw.text_or(&["description", "content"], ""),
            author: raw.text_or(&["author"], ""),
            image: raw.non_empty(&["image"]),
            published: raw
                .flag(&["is_published", "published"])
                .unwrap_or(false),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published: bool,
    pub image: Option<ImageSource>,
}

impl ToForm for BlogDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("title", &self.title)
            .field("description", &self.content)
            .field("author", &self.author)
            .field("is_published", self.published)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub image: Option<ImageSource>,
}

impl ToForm for BlogPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("title", self.title.as_deref())
            .opt("description", self.content.as_deref())
            .opt("author", self.author.as_deref())
            .opt("is_published", self.published)
            .opt("image", self.image.clone())
    }
}

impl Create for BlogPost {
    type Draft = BlogDraft;
    const CREATE: &'static str = "blog/add";
}

impl Update for BlogPost {
    type Patch = BlogPatch;

    fn update_path(id: RecordId, _patch: &BlogPatch) -> String {
        format!("blog/update/{id}")
    }
}

impl Delete for BlogPost {
    const DELETE: &'static str = "blog/delete";
    const DELETE_KEY: &'static str = "id";
}
