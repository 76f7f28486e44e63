//! Live context for the currently selected chat.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{ChatRef, ContextError, ContextResolver, ContextSnapshot, ContextState};
use crate::api::ChatApi;
use crate::cache::ContextStore;

/// Owns the [`ContextState`] for one consumer and keeps it in sync with the
/// selected chat.
///
/// Selecting a chat serves it from the store when a fresh snapshot exists,
/// otherwise a fetch cycle is spawned on the Tokio runtime. Each cycle owns a
/// cancellation token and a generation number; starting a new cycle, clearing
/// the selection or dropping the `ChatContext` cancels the previous one, and
/// a cycle only commits to the store and the state while its generation is
/// still current.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use quix::api::HttpChatApi;
/// # use quix::cache::{CacheConfig, CacheRegistry, ContextCache};
/// # use quix::context::{ChatContext, ChatRef};
/// # async fn demo(api: HttpChatApi) -> anyhow::Result<()> {
/// let store = ContextCache::new(CacheRegistry::global(), CacheConfig::chat_context())?;
/// let context = ChatContext::with_api(Arc::new(api), Arc::new(store));
///
/// context.select(Some(ChatRef::group("g1")));
/// let state = context.settled().await;
/// println!("{} members", state.members_count());
/// # Ok(())
/// # }
/// ```
pub struct ChatContext {
    inner: Arc<Inner>,
}

struct Inner {
    resolver: ContextResolver,
    store: Arc<dyn ContextStore>,
    state: watch::Sender<ContextState>,
    cycle: Mutex<Cycle>,
}

/// The selected chat and the fetch cycle serving it.
#[derive(Default)]
struct Cycle {
    generation: u64,
    active: Option<ChatRef>,
    cancel: Option<CancellationToken>,
}

impl Cycle {
    /// Cancel whatever is in flight and invalidate its generation.
    fn supersede(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.generation += 1;
    }
}

impl ChatContext {
    pub fn new(resolver: ContextResolver, store: Arc<dyn ContextStore>) -> Self {
        let (state, _) = watch::channel(ContextState::idle());
        Self {
            inner: Arc::new(Inner {
                resolver,
                store,
                state,
                cycle: Mutex::new(Cycle::default()),
            }),
        }
    }

    pub fn with_api(api: Arc<dyn ChatApi>, store: Arc<dyn ContextStore>) -> Self {
        Self::new(ContextResolver::new(api), store)
    }

    /// Select a chat, or clear the selection with `None`.
    ///
    /// Selecting the chat that is already active does nothing. A cache miss
    /// spawns a fetch, so this must be called inside a Tokio runtime.
    pub fn select(&self, chat: Option<ChatRef>) {
        let mut cycle = self.inner.cycle.lock();

        let Some(chat) = chat else {
            if cycle.active.take().is_some() {
                debug!("Chat selection cleared");
            }
            cycle.supersede();
            self.inner.state.send_replace(ContextState::idle());
            return;
        };

        if cycle.active.as_ref() == Some(&chat) {
            return;
        }

        cycle.supersede();
        cycle.active = Some(chat.clone());

        match self.inner.store.get(&chat.chat_id) {
            Some(snapshot) if snapshot.kind == chat.kind => {
                debug!("Serving {} from cache", chat);
                self.inner.state.send_replace(ContextState::ready(snapshot));
            }
            _ => self.inner.start_cycle(&mut cycle, chat),
        }
    }

    /// Drop the cached snapshot for the active chat and fetch it again.
    pub fn refresh(&self) {
        let mut cycle = self.inner.cycle.lock();
        let Some(chat) = cycle.active.clone() else {
            return;
        };

        debug!("Refreshing {}", chat);
        self.inner.store.invalidate(&chat.chat_id);
        cycle.supersede();
        self.inner.start_cycle(&mut cycle, chat);
    }

    /// The currently selected chat.
    pub fn active(&self) -> Option<ChatRef> {
        self.inner.cycle.lock().active.clone()
    }

    /// A copy of the current state.
    pub fn state(&self) -> ContextState {
        self.inner.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<ContextState> {
        self.inner.state.subscribe()
    }

    /// Wait until no fetch is in flight and return the state at that point.
    pub async fn settled(&self) -> ContextState {
        let mut rx = self.inner.state.subscribe();
        let settled = rx.wait_for(|state| !state.is_loading).await.map(|s| s.clone());
        // The sender lives in `self`, so the channel cannot close here.
        settled.unwrap_or_else(|_| self.state())
    }
}

impl Drop for ChatContext {
    fn drop(&mut self) {
        self.inner.cycle.lock().supersede();
    }
}

impl Inner {
    /// Enter `Loading` for `chat` and spawn its fetch.
    fn start_cycle(self: &Arc<Self>, cycle: &mut Cycle, chat: ChatRef) {
        let cancel = CancellationToken::new();
        cycle.cancel = Some(cancel.clone());
        let generation = cycle.generation;

        debug!("Fetching context for {} (generation {})", chat, generation);
        self.state.send_replace(ContextState::loading(&chat));

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let result = inner.resolver.resolve(&chat, &cancel).await;
            inner.commit(generation, &chat, &cancel, result);
        });
    }

    fn commit(
        &self,
        generation: u64,
        chat: &ChatRef,
        cancel: &CancellationToken,
        result: Result<ContextSnapshot, ContextError>,
    ) {
        let mut cycle = self.cycle.lock();
        if cycle.generation != generation || cancel.is_cancelled() {
            debug!("Discarding superseded context for {}", chat);
            return;
        }
        cycle.cancel = None;

        match result {
            Ok(snapshot) => {
                self.store.set(&chat.chat_id, snapshot.clone());
                self.state.send_replace(ContextState::ready(snapshot));
            }
            Err(ContextError::Cancelled) => {}
            Err(e) => {
                warn!("Context fetch for {} failed: {}", chat, e);
                self.state.send_replace(ContextState::failed(chat, e.to_string()));
            }
        }
    }
}
