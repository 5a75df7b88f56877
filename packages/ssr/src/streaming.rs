//! Streaming a buffer to the client as its pending content resolves.
//!
//! This writer streams strictly in document order: everything resolved
//! ahead of the first pending entry is flushed immediately, then the
//! writer waits for that entry and carries on. In-order streaming works
//! without any javascript on the client, at the cost that a slow sub-tree
//! near the top of the page holds back everything after it.

use crate::buffer::{BufferError, BufferItem, SsrBuffer};
use futures_channel::mpsc::Sender;
use futures_util::future::BoxFuture;
use std::fmt::Display;

/// Writes render output into a channel as in-order chunks.
pub struct StreamingWriter<E = std::convert::Infallible> {
    channel: Sender<Result<String, E>>,
    chunk: String,
}

impl<E> StreamingWriter<E> {
    /// Create a new streaming writer that sends `before_body` as its
    /// first chunk.
    pub fn new(before_body: impl Display, mut render_into: Sender<Result<String, E>>) -> Self {
        let start_html = before_body.to_string();
        _ = render_into.start_send(Ok(start_html));

        Self {
            channel: render_into,
            chunk: String::new(),
        }
    }

    /// Send a chunk of html that is already fully resolved.
    pub fn send(&mut self, html: impl Display) {
        _ = self.channel.start_send(Ok(html.to_string()));
    }

    /// Stream `buffer` in document order, flushing a chunk each time the
    /// writer has to wait on a pending sub-buffer.
    ///
    /// A dropped receiver is ignored; client disconnects are not render
    /// errors. A canceled pending entry fails the pass.
    pub async fn stream_buffer(&mut self, buffer: SsrBuffer) -> Result<(), BufferError>
    where
        E: Send,
    {
        self.walk(buffer).await?;
        self.flush();
        Ok(())
    }

    fn walk(&mut self, buffer: SsrBuffer) -> BoxFuture<'_, Result<(), BufferError>>
    where
        E: Send,
    {
        Box::pin(async move {
            for item in buffer.into_items() {
                match item {
                    BufferItem::Text(text) => self.chunk.push_str(&text),
                    BufferItem::Nested(nested) => self.walk(nested).await?,
                    BufferItem::Pending(pending) => {
                        // Everything before this position is final; let
                        // the client have it while we wait.
                        self.flush();
                        let nested = pending.resolved().await?;
                        self.walk(nested).await?;
                    }
                }
            }
            Ok(())
        })
    }

    fn flush(&mut self) {
        if !self.chunk.is_empty() {
            let chunk = std::mem::take(&mut self.chunk);
            _ = self.channel.start_send(Ok(chunk));
        }
    }

    /// Close the stream with an error.
    pub fn close_with_error(&mut self, error: E) {
        _ = self.channel.start_send(Err(error));
    }
}
