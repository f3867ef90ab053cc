//! Client-side item state container.
//!
//! [`ItemStore`] owns the full item collection fetched from the service, the
//! search/filter controls, the derived filtered view and pagination cursor,
//! and the transient modal and toast state. Every mutation of the collection
//! or of a control recomputes the filtered view and resets the cursor to
//! page 1.

use std::time::{Duration, Instant};

use itemdesk_core::item::{Item, ItemInput, ItemStatus};
use itemdesk_core::types::DbId;

use crate::api::{ClientError, ItemsApi};
use crate::view::{filter_items, paginate, total_pages, PageView, StatusFilter};

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Loading state of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Ready,
}

/// Overlay currently shown on top of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    /// Item form; `None` while creating a new item.
    Editing(Option<Item>),
    /// Delete confirmation for the given item.
    ConfirmingDelete(DbId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }
}

/// Editable fields of the item form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub status: ItemStatus,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: ItemStatus::Active,
        }
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            status: item.status,
        }
    }
}

impl ItemForm {
    /// Request body for this form. An empty description is sent as absent.
    pub fn to_input(&self) -> ItemInput {
        ItemInput {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            status: Some(self.status.as_str().to_string()),
        }
    }
}

/// Client-side store over an [`ItemsApi`] transport.
pub struct ItemStore<A> {
    api: A,
    phase: Phase,
    items: Vec<Item>,
    search: String,
    filter: StatusFilter,
    filtered: Vec<Item>,
    current_page: usize,
    modal: Modal,
    toast: Option<Toast>,
}

impl<A: ItemsApi> ItemStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            phase: Phase::Idle,
            items: Vec::new(),
            search: String::new(),
            filter: StatusFilter::All,
            filtered: Vec::new(),
            current_page: 1,
            modal: Modal::None,
            toast: None,
        }
    }

    // ---- accessors ----

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The full collection as last fetched.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items passing the current search and filter.
    pub fn filtered(&self) -> &[Item] {
        &self.filtered
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The current page of the filtered view.
    pub fn page(&self) -> PageView<'_> {
        paginate(&self.filtered, self.current_page)
    }

    /// The toast, if it is still within its display window.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast_at(Instant::now())
    }

    pub fn toast_at(&self, now: Instant) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible_at(now))
    }

    // ---- collection ----

    /// Re-fetch the full collection. On failure the previous collection is
    /// kept and an error toast is shown.
    pub async fn refresh(&mut self) {
        self.begin_load();
        let result = self.api.list().await;
        self.finish_load(result);
    }

    /// Enter [`Phase::Loading`]. For callers that run the List request
    /// themselves and render the loading state while it is in flight.
    pub fn begin_load(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Apply the outcome of a List request and enter [`Phase::Ready`].
    pub fn finish_load(&mut self, result: Result<Vec<Item>, ClientError>) {
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Fetched items");
                self.items = items;
                self.recompute();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch items");
                self.show_toast("Failed to load items", ToastKind::Error);
            }
        }
        self.phase = Phase::Ready;
    }

    // ---- controls ----

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn next_page(&mut self) {
        let page = self.page();
        if page.has_next {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Jump to `page`, clamped into the existing page range.
    pub fn go_to_page(&mut self, page: usize) {
        let last = total_pages(self.filtered.len()).max(1);
        self.current_page = page.clamp(1, last);
    }

    // ---- modals ----

    pub fn open_create(&mut self) {
        self.modal = Modal::Editing(None);
    }

    /// Load the latest copy of an item and open it for editing.
    pub async fn open_edit(&mut self, id: DbId) {
        match self.api.get(id).await {
            Ok(item) => self.modal = Modal::Editing(Some(item)),
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to load item for editing");
                self.show_toast("Failed to load item", ToastKind::Error);
            }
        }
    }

    pub fn request_delete(&mut self, id: DbId) {
        self.modal = Modal::ConfirmingDelete(id);
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    /// Save the form: update when editing an existing item, create otherwise.
    /// No-op unless the item form is open. On failure the modal stays open.
    pub async fn submit(&mut self, form: &ItemForm) {
        let editing = match &self.modal {
            Modal::Editing(item) => item.as_ref().map(|i| i.id),
            _ => return,
        };

        if form.name.is_empty() {
            self.show_toast("Name is required", ToastKind::Error);
            return;
        }

        let input = form.to_input();

        let result = match editing {
            Some(id) => self.api.update(id, &input).await.map(|_| "Item updated"),
            None => self.api.create(&input).await.map(|_| "Item added"),
        };

        match result {
            Ok(message) => {
                self.modal = Modal::None;
                self.show_toast(message, ToastKind::Success);
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save item");
                self.show_toast("Failed to save item", ToastKind::Error);
            }
        }
    }

    /// Delete the item awaiting confirmation. No-op unless a delete
    /// confirmation is open.
    pub async fn confirm_delete(&mut self) {
        let Modal::ConfirmingDelete(id) = self.modal else {
            return;
        };

        match self.api.delete(id).await {
            Ok(()) => {
                self.modal = Modal::None;
                self.show_toast("Item deleted", ToastKind::Success);
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to delete item");
                self.show_toast("Failed to delete item", ToastKind::Error);
            }
        }
    }

    // ---- internals ----

    fn recompute(&mut self) {
        self.filtered = filter_items(&self.items, &self.search, self.filter);
        self.current_page = 1;
    }

    /// Replace any visible toast; the new one gets a full display window.
    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }
}
