//! Console transport.
//!
//! This module provides the [`ConsoleClient`], a line based transport reading
//! messages from an input stream and writing replies to an output stream. Every
//! reply is tagged with its visibility so that public, private and ephemeral
//! answers can be told apart in a terminal:
//!
//! ```text
//! > !coffee brew Blue Heeler
//! [public] <@U0LOCAL|operator> brewed a pot of Blue Heeler.
//! > /coffee
//! [private to operator] Blue Heeler was brewed 0 minutes ago by operator.
//! ```

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
    task::JoinSet,
};

use crate::commands::{Scope, UserIdentity};

/// Line based client attributing every message to one user.
pub struct ConsoleClient<W = Stdout> {
    /// Author of every message read
    user: UserIdentity,
    /// Output replies are written to
    writer: Mutex<W>,
}

impl ConsoleClient<Stdout> {
    /// Creates a client writing to the process standard output.
    pub fn stdio(user: UserIdentity) -> Self {
        ConsoleClient::new(user, tokio::io::stdout())
    }
}

impl<W> ConsoleClient<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(user: UserIdentity, writer: W) -> Self {
        ConsoleClient {
            user,
            writer: Mutex::new(writer),
        }
    }

    /// Reads messages until the end of the input.
    ///
    /// Every non blank line is handed to `on_message` and the returned future is
    /// spawned, so a slow message does not hold back the next ones. Returns once
    /// the input is exhausted and every spawned future has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub async fn sync<R, F, Fut>(&self, reader: R, on_message: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: Fn(String, UserIdentity) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        info!("start reading messages");

        let mut lines = reader.lines();
        let mut tasks = JoinSet::new();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            debug!("received message: {}", line);
            tasks.spawn(on_message(line, self.user.clone()));
        }

        info!("end of input, waiting for {} pending messages", tasks.len());
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("message task failed: {:?}", e);
            }
        }

        Ok(())
    }

    /// Writes a reply tagged with its visibility.
    pub async fn send_reply(&self, scope: Scope, user: &UserIdentity, text: &str) {
        let line = format_reply(scope, user, text);

        let mut writer = self.writer.lock().await;
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            error!("Failed to send message: {:?}", e);
            return;
        }
        if let Err(e) = writer.flush().await {
            error!("Failed to flush message: {:?}", e);
        }
    }
}

/// Formats a reply as written on the console, trailing newline included.
fn format_reply(scope: Scope, user: &UserIdentity, text: &str) -> String {
    match scope {
        Scope::Public => format!("[public] {}\n", text),
        Scope::Private | Scope::Ephemeral => format!("[{} to {}] {}\n", scope, user.name, text),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity::new("U1", "alice")
    }

    #[test]
    fn test_format_reply_visibility() {
        assert_eq!(
            format_reply(Scope::Public, &alice(), "Fresh pot!"),
            "[public] Fresh pot!\n"
        );
        assert_eq!(
            format_reply(Scope::Private, &alice(), "Fresh pot!"),
            "[private to alice] Fresh pot!\n"
        );
        assert_eq!(
            format_reply(Scope::Ephemeral, &alice(), "Fresh pot!"),
            "[ephemeral to alice] Fresh pot!\n"
        );
    }

    #[tokio::test]
    async fn test_send_reply_writes_tagged_lines() {
        let client = ConsoleClient::new(alice(), Vec::new());

        client.send_reply(Scope::Public, &alice(), "one").await;
        client.send_reply(Scope::Private, &alice(), "two").await;

        let written = client.writer.lock().await.clone();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "[public] one\n[private to alice] two\n"
        );
    }

    #[tokio::test]
    async fn test_sync_skips_blank_lines() {
        let client = ConsoleClient::new(alice(), Vec::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let input: &[u8] = b"!coffee brew Blue Heeler\n\n   \n/coffee\n";
        client
            .sync(input, |line, user| {
                let received = Arc::clone(&received);
                async move {
                    received.lock().await.push((line, user.name));
                }
            })
            .await
            .unwrap();

        let mut received = received.lock().await.clone();
        received.sort();
        assert_eq!(
            received,
            vec![
                ("!coffee brew Blue Heeler".to_owned(), "alice".to_owned()),
                ("/coffee".to_owned(), "alice".to_owned()),
            ]
        );
    }
}
