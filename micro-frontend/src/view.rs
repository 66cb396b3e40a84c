//! The post list view: fetches `posts/query` once on initialization and
//! holds the result for rendering.
//!
//! Every fetch runs inside a cancellation scope owned by the view. Tearing
//! the view down (explicitly or by dropping it) cancels the scope, and a
//! response that arrives afterwards is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use micro_client::{ClientError, MicroService, ReqwestTransport, Transport};
use micro_core::{Post, PostQuery, PostsResponse};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::ViewError;
use crate::render;

/// Lifecycle of a [`PostListView`].
///
/// `Idle -> Loading -> Loaded | Failed | Cancelled`; there is no way back to
/// `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewState {
    /// Created, `on_init` not yet called.
    #[default]
    Idle,
    /// The fetch is in flight.
    Loading,
    /// The registry answered successfully. `posts` may still be unset if
    /// the response carried no `posts` key.
    Loaded,
    /// The fetch failed; `posts` was left untouched.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The view was torn down before the fetch resolved.
    Cancelled,
}

impl ViewState {
    /// `true` once no further transition can happen.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Idle | Self::Loading)
    }
}

/// Data shared between the view and its in-flight fetch.
#[derive(Debug, Default)]
pub(crate) struct Model {
    pub(crate) state: ViewState,
    pub(crate) posts: Option<Vec<Post>>,
}

/// Handle to the fetch started by [`PostListView::on_init`].
///
/// Dropping it does NOT cancel the fetch; cancellation belongs to the view.
#[derive(Debug)]
pub struct InflightLoad {
    task: JoinHandle<ViewState>,
}

impl InflightLoad {
    /// Wait for the fetch to settle and return the view's final state.
    pub async fn finished(self) -> ViewState {
        match self.task.await {
            Ok(state) => state,
            Err(e) => ViewState::Failed {
                reason: format!("load task aborted: {e}"),
            },
        }
    }
}

/// Displays the list of posts served by the registry's `posts` service.
pub struct PostListView<T: Transport + 'static = ReqwestTransport> {
    gateway: Arc<MicroService<T>>,
    model: Arc<RwLock<Model>>,
    scope: CancellationToken,
    initialized: AtomicBool,
}

impl<T: Transport + 'static> PostListView<T> {
    /// Create an idle view over the given gateway.
    #[must_use]
    pub fn new(gateway: Arc<MicroService<T>>) -> Self {
        Self {
            gateway,
            model: Arc::new(RwLock::new(Model::default())),
            scope: CancellationToken::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialization hook: start fetching the post list.
    ///
    /// Returns immediately with the view in [`ViewState::Loading`]; the
    /// fetch completes on the runtime. Must be called from within a Tokio
    /// runtime.
    ///
    /// # Errors
    /// Returns [`ViewError::AlreadyInitialized`] on a second call and
    /// [`ViewError::Destroyed`] after [`PostListView::on_destroy`]. Neither
    /// issues a request.
    pub fn on_init(&self) -> Result<InflightLoad, ViewError> {
        if self.scope.is_cancelled() {
            return Err(ViewError::Destroyed);
        }
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(ViewError::AlreadyInitialized);
        }

        write_model(&self.model).state = ViewState::Loading;
        tracing::debug!("post list loading");

        let gateway = Arc::clone(&self.gateway);
        let model = Arc::clone(&self.model);
        let cancel = self.scope.child_token();
        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                res = gateway.query_posts(PostQuery::latest()) => Some(res),
            };
            settle(&model, &cancel, outcome)
        });

        Ok(InflightLoad { task })
    }

    /// Initialize and wait for the fetch to settle.
    ///
    /// # Errors
    /// Same as [`PostListView::on_init`].
    pub async fn init(&self) -> Result<ViewState, ViewError> {
        Ok(self.on_init()?.finished().await)
    }

    /// Teardown hook: cancel any in-flight fetch.
    ///
    /// Idempotent. A fetch that has not settled yet ends in
    /// [`ViewState::Cancelled`] and never writes `posts`.
    pub fn on_destroy(&self) {
        if !self.scope.is_cancelled() {
            tracing::debug!("post list destroyed");
        }
        self.scope.cancel();
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        read_model(&self.model).state.clone()
    }

    /// Posts received from the registry, or `None` if never set.
    #[must_use]
    pub fn posts(&self) -> Option<Vec<Post>> {
        read_model(&self.model).posts.clone()
    }

    /// Render the view as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let model = read_model(&self.model);
        render::render(&model.state, model.posts.as_deref())
    }
}

impl<T: Transport + 'static> Drop for PostListView<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Apply the fetch outcome unless the view was torn down first.
fn settle(
    model: &RwLock<Model>,
    cancel: &CancellationToken,
    outcome: Option<Result<PostsResponse, ClientError>>,
) -> ViewState {
    let mut model = write_model(model);

    let next = match outcome {
        _ if cancel.is_cancelled() => {
            tracing::debug!("post list fetch discarded after teardown");
            ViewState::Cancelled
        }
        None => ViewState::Cancelled,
        Some(Ok(resp)) => {
            if resp.posts.is_none() {
                tracing::debug!("response carried no posts field");
            }
            tracing::info!(count = resp.posts.as_ref().map_or(0, Vec::len), "posts loaded");
            model.posts = resp.posts;
            ViewState::Loaded
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to load posts");
            ViewState::Failed { reason: e.to_string() }
        }
    };

    model.state = next.clone();
    next
}

// Writers only assign whole fields, so a poisoned model is still consistent.
fn read_model(model: &RwLock<Model>) -> RwLockReadGuard<'_, Model> {
    model.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_model(model: &RwLock<Model>) -> RwLockWriteGuard<'_, Model> {
    model.write().unwrap_or_else(PoisonError::into_inner)
}
