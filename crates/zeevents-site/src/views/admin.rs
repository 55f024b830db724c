//! Admin console views
//!
//! Dashboard, page management, media library and settings. All of
//! these sit behind the admin guard in the app layer; the adapters
//! enforce authentication again on every write.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use zeevents_core::adapters::{
    MediaDeleteAdapter, MediaUploadAdapter, PageDeleteAdapter, PageSaveAdapter,
    PasswordChangeAdapter,
};
use zeevents_core::backend::{
    RecordOrder, StorageEntry, CLIENTS_TABLE, MESSAGES_TABLE, PAGES_TABLE, PROPOSALS_TABLE,
};
use zeevents_core::{CoreError, Result};

use crate::context::SiteContext;
use crate::views::{FormView, ViewEffect};

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub pages: usize,
    pub proposals: usize,
    pub messages: usize,
    pub clients: usize,
    pub media_objects: usize,
}

/// `/control-panel/dashboard`
pub struct DashboardView;

impl DashboardView {
    pub async fn stats(ctx: &SiteContext) -> Result<DashboardStats> {
        let records = &ctx.backend().records;
        let pages = records.select(PAGES_TABLE, None, None).await?.len();
        let proposals = records.select(PROPOSALS_TABLE, None, None).await?.len();
        let messages = records.select(MESSAGES_TABLE, None, None).await?.len();
        let clients = records.select(CLIENTS_TABLE, None, None).await?.len();
        let media_objects = ctx
            .backend()
            .storage
            .list(&ctx.config().media_bucket, "")
            .await?
            .len();

        Ok(DashboardStats {
            pages,
            proposals,
            messages,
            clients,
            media_objects,
        })
    }
}

/// One page row in the management listing
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// `/control-panel/pages`: listing plus a create-or-edit editor
pub struct PagesView {
    editor: Option<FormView>,
    editing: Option<Uuid>,
}

impl PagesView {
    pub fn new() -> Self {
        Self {
            editor: None,
            editing: None,
        }
    }

    pub async fn list(ctx: &SiteContext) -> Result<Vec<PageSummary>> {
        let rows = ctx
            .backend()
            .records
            .select(PAGES_TABLE, None, Some(RecordOrder::newest_first()))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| PageSummary {
                id: r.id,
                title: r.fields["title"].as_str().unwrap_or("").to_string(),
                created_at: r.created_at,
            })
            .collect())
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor.is_some()
    }

    /// Whether the open editor targets an existing page
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Open the editor in create mode
    pub fn open_create(&mut self) {
        self.editor = Some(FormView::new(Box::new(PageSaveAdapter::create())));
        self.editing = None;
    }

    /// Open the editor on an existing page, seeded with its current
    /// title and content.
    pub async fn open_edit(&mut self, ctx: &SiteContext, id: Uuid) -> Result<()> {
        let rows = ctx.backend().records.select(PAGES_TABLE, None, None).await?;
        let row = rows
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::UnknownField(format!("page {}", id)))?;

        let mut editor = FormView::new(Box::new(PageSaveAdapter::edit(id)));
        editor.prefill("title", row.fields["title"].as_str().unwrap_or(""))?;
        editor.prefill("content", row.fields["content"].as_str().unwrap_or(""))?;
        self.editor = Some(editor);
        self.editing = Some(id);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
        self.editing = None;
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match self.editor.as_mut() {
            Some(editor) => editor.set(name, value),
            None => Err(CoreError::UnknownField(name.to_string())),
        }
    }

    pub fn editor(&self) -> Option<&FormView> {
        self.editor.as_ref()
    }

    /// Submit the open editor. Closes it on success.
    pub async fn save(&mut self, ctx: &SiteContext) -> ViewEffect {
        let Some(editor) = self.editor.as_mut() else {
            return ViewEffect::none();
        };
        let effect = editor.submit(ctx).await;
        if effect.notice.as_ref().map(|n| n.level) == Some(crate::notify::NoticeLevel::Info) {
            self.close_editor();
        }
        effect
    }

    pub async fn delete(&mut self, ctx: &SiteContext, id: Uuid) -> ViewEffect {
        let mut form = FormView::new(Box::new(PageDeleteAdapter));
        if form.set("pageId", &id.to_string()).is_err() {
            return ViewEffect::none();
        }
        if self.editing == Some(id) {
            self.close_editor();
        }
        form.submit(ctx).await
    }
}

impl Default for PagesView {
    fn default() -> Self {
        Self::new()
    }
}

/// One media row with its public URL
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub entry: StorageEntry,
    pub url: String,
}

/// `/control-panel/media`
pub struct MediaView;

impl MediaView {
    pub async fn list(ctx: &SiteContext) -> Result<Vec<MediaItem>> {
        let bucket = &ctx.config().media_bucket;
        let entries = ctx.backend().storage.list(bucket, "").await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let url = ctx.backend().storage.public_url(bucket, &entry.path);
                MediaItem { entry, url }
            })
            .collect())
    }

    pub async fn upload(ctx: &SiteContext, file_name: &str, bytes: Vec<u8>) -> ViewEffect {
        let mut form = FormView::new(Box::new(MediaUploadAdapter::new(bytes)));
        if form.set("fileName", file_name).is_err() {
            return ViewEffect::none();
        }
        form.submit(ctx).await
    }

    pub async fn delete(ctx: &SiteContext, path: &str) -> ViewEffect {
        let mut form = FormView::new(Box::new(MediaDeleteAdapter));
        if form.set("path", path).is_err() {
            return ViewEffect::none();
        }
        form.submit(ctx).await
    }
}

/// `/control-panel/settings`: admin password change
pub struct SettingsView {
    form: FormView,
}

impl SettingsView {
    pub fn new() -> Self {
        Self {
            form: FormView::new(Box::new(PasswordChangeAdapter)),
        }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set(name, value)
    }

    pub async fn submit(&mut self, ctx: &SiteContext) -> ViewEffect {
        self.form.submit(ctx).await
    }
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}
