//! The ordered buffer a streaming render pass accumulates output into.
//!
//! The render loop pushes markup in emission order. When a sub-tree's
//! markup is not known yet (a component still awaiting data), the loop
//! pushes a [`PendingBuffer`] instead, reserving the sub-tree's position
//! in the final output before its value exists. Flattening reproduces
//! emission order no matter when each pending entry resolves.
//!
//! Each buffer has a single logical writer; nested buffers are owned by
//! exactly one parent slot, so no locking is involved anywhere.

use futures_channel::oneshot;
use futures_util::future::BoxFuture;

/// Errors produced while flattening a buffer.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// A pending sub-buffer's slot was dropped before it resolved. The
    /// host decides whether to substitute an error placeholder or abort
    /// the pass; the buffer never swallows this as empty content.
    #[error("pending buffer was dropped before it resolved")]
    Canceled,
    /// Synchronous flattening was requested while async content was still
    /// unresolved.
    #[error("buffer still contains unresolved async content")]
    Unresolved,
}

/// A single entry in an [`SsrBuffer`].
#[derive(Debug)]
pub enum BufferItem {
    /// Resolved markup.
    Text(String),
    /// A nested buffer, inlined at this position when flattening.
    Nested(SsrBuffer),
    /// A nested buffer whose content is not available yet.
    Pending(PendingBuffer),
}

impl From<String> for BufferItem {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for BufferItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<SsrBuffer> for BufferItem {
    fn from(buffer: SsrBuffer) -> Self {
        Self::Nested(buffer)
    }
}

impl From<PendingBuffer> for BufferItem {
    fn from(pending: PendingBuffer) -> Self {
        Self::Pending(pending)
    }
}

/// Create a pending sub-buffer along with the slot that resolves it.
///
/// The [`PendingBuffer`] is pushed into a parent buffer to reserve its
/// output position; the [`BufferSlot`] travels to whatever task produces
/// the sub-tree and is consumed by [`BufferSlot::resolve`].
pub fn pending() -> (BufferSlot, PendingBuffer) {
    let (tx, rx) = oneshot::channel();
    (BufferSlot { tx }, PendingBuffer { rx })
}

/// A placeholder reserving output position for content not yet resolved.
#[derive(Debug)]
pub struct PendingBuffer {
    rx: oneshot::Receiver<SsrBuffer>,
}

impl PendingBuffer {
    /// Wait for the paired [`BufferSlot`] to deliver the sub-buffer.
    pub async fn resolved(self) -> Result<SsrBuffer, BufferError> {
        self.rx.await.map_err(|_| BufferError::Canceled)
    }
}

/// The resolving half of a pending sub-buffer. Resolution consumes the
/// slot, so it happens exactly once; dropping the slot unresolved cancels
/// the pending entry.
#[derive(Debug)]
pub struct BufferSlot {
    tx: oneshot::Sender<SsrBuffer>,
}

impl BufferSlot {
    /// Deliver the sub-buffer's final content.
    pub fn resolve(self, buffer: SsrBuffer) {
        // The receiver is gone if the pass was aborted; the content is
        // discarded wholesale with it.
        let _ = self.tx.send(buffer);
    }
}

/// An append-only, insertion-ordered sequence of rendering output.
#[derive(Debug, Default)]
pub struct SsrBuffer {
    items: Vec<BufferItem>,
    appendable: bool,
    has_async: bool,
}

impl SsrBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, preserving emission order.
    ///
    /// Consecutive text pushes are coalesced into the previous item as
    /// they arrive, so the item count is bounded by the number of
    /// non-text entries. Pushing a pending entry, or a nested buffer that
    /// itself contains one, sets [`has_async`](Self::has_async) for good.
    pub fn push(&mut self, item: impl Into<BufferItem>) {
        match item.into() {
            BufferItem::Text(text) => {
                match self.items.last_mut() {
                    Some(BufferItem::Text(last)) if self.appendable => last.push_str(&text),
                    _ => self.items.push(BufferItem::Text(text)),
                }
                self.appendable = true;
            }
            BufferItem::Nested(buffer) => {
                self.has_async |= buffer.has_async;
                self.items.push(BufferItem::Nested(buffer));
                self.appendable = false;
            }
            BufferItem::Pending(pending) => {
                self.has_async = true;
                self.items.push(BufferItem::Pending(pending));
                self.appendable = false;
            }
        }
    }

    /// True if pending content was ever pushed, directly or nested.
    pub fn has_async(&self) -> bool {
        self.has_async
    }

    /// The buffer's items in insertion order.
    pub fn items(&self) -> &[BufferItem] {
        &self.items
    }

    /// Consume the buffer, returning its items in insertion order.
    pub fn into_items(self) -> Vec<BufferItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flatten without awaiting anything.
    ///
    /// This is the fast path for the response writer once it has observed
    /// `has_async() == false`; a buffer that ever held pending content
    /// fails with [`BufferError::Unresolved`].
    pub fn try_flatten(&self) -> Result<String, BufferError> {
        let mut out = String::new();
        self.flatten_resolved(&mut out)?;
        Ok(out)
    }

    fn flatten_resolved(&self, out: &mut String) -> Result<(), BufferError> {
        if self.has_async {
            return Err(BufferError::Unresolved);
        }
        for item in &self.items {
            match item {
                BufferItem::Text(text) => out.push_str(text),
                BufferItem::Nested(buffer) => buffer.flatten_resolved(out)?,
                BufferItem::Pending(_) => return Err(BufferError::Unresolved),
            }
        }
        Ok(())
    }

    /// Flatten the buffer, awaiting every pending sub-buffer at the
    /// position reserved for it.
    ///
    /// The order in which independent pending entries resolve never
    /// affects the output; only insertion order does.
    pub async fn flatten(self) -> Result<String, BufferError> {
        let mut out = String::new();
        self.flatten_into(&mut out).await?;
        Ok(out)
    }

    fn flatten_into<'a>(self, out: &'a mut String) -> BoxFuture<'a, Result<(), BufferError>> {
        Box::pin(async move {
            for item in self.items {
                match item {
                    BufferItem::Text(text) => out.push_str(&text),
                    BufferItem::Nested(buffer) => buffer.flatten_into(out).await?,
                    BufferItem::Pending(pending) => {
                        pending.resolved().await?.flatten_into(out).await?;
                    }
                }
            }
            Ok(())
        })
    }
}
