// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IRC client over plain TCP

use super::{ChatAdapter, ChatError, ChatEvent, ChatMessage, IrcLine};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, trace, warn};

/// Appended to the nick while the server reports it in use
const NICK_SUFFIX: char = '_';

/// Connection settings for one IRC network
#[derive(Clone, Debug)]
pub struct IrcConfig {
    pub server: String,
    pub port: u16,
    pub nick: String,
    pub password: Option<String>,
    pub realname: String,
    pub channel: String,
    /// Upper bound on the wait for the server's welcome
    pub register_timeout: Duration,
}

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    buf: Vec<u8>,
    writer: OwnedWriteHalf,
}

impl Connection {
    async fn write(&mut self, line: &IrcLine) -> Result<(), ChatError> {
        trace!(%line, "irc >>");
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await?;
        Ok(())
    }

    /// Next parseable line; `None` at end of stream
    ///
    /// IRC carries no encoding; bytes that are not UTF-8 are replaced
    /// rather than failing the read.
    async fn read(&mut self) -> Result<Option<IrcLine>, ChatError> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }
            let raw = String::from_utf8_lossy(&self.buf);
            let raw = raw.trim_end_matches(['\r', '\n']);
            trace!(line = %raw, "irc <<");
            if let Some(line) = IrcLine::parse(raw) {
                return Ok(Some(line));
            }
        }
    }
}

/// IRC session: registers, joins one channel, answers pings
pub struct IrcAdapter {
    config: IrcConfig,
    nick: String,
    conn: Option<Connection>,
}

impl IrcAdapter {
    pub fn new(config: IrcConfig) -> Self {
        let nick = config.nick.clone();
        Self {
            config,
            nick,
            conn: None,
        }
    }

    /// Nick currently held on the server
    pub fn nickname(&self) -> &str {
        &self.nick
    }

    /// Wait for the welcome numeric, renaming while the nick is taken
    async fn register(conn: &mut Connection, nick: &mut String) -> Result<(), ChatError> {
        while let Some(line) = conn.read().await? {
            match line.command.as_str() {
                "PING" => conn.write(&IrcLine::new("PONG", line.params)).await?,
                "433" => {
                    nick.push(NICK_SUFFIX);
                    warn!(nick = %nick, "nickname in use, retrying");
                    conn.write(&IrcLine::new("NICK", [nick.as_str()])).await?;
                }
                "432" => {
                    return Err(ChatError::Closed(format!("erroneous nickname {}", nick)));
                }
                "001" => {
                    if let Some(granted) = line.param(0) {
                        *nick = granted.to_string();
                    }
                    return Ok(());
                }
                "ERROR" => {
                    return Err(ChatError::Closed(
                        line.param(0).unwrap_or_default().to_string(),
                    ));
                }
                _ => {}
            }
        }
        Err(ChatError::Closed(
            "connection closed during registration".to_string(),
        ))
    }

    async fn read_event(
        conn: &mut Connection,
        nick: &mut String,
    ) -> Result<Option<ChatEvent>, ChatError> {
        while let Some(line) = conn.read().await? {
            match line.command.as_str() {
                "PING" => conn.write(&IrcLine::new("PONG", line.params)).await?,
                "PRIVMSG" => {
                    if let (Some(sender), Some(target), Some(text)) =
                        (line.prefix.as_deref(), line.param(0), line.param(1))
                    {
                        return Ok(Some(ChatEvent::Message(ChatMessage {
                            sender: sender.to_string(),
                            target: target.to_string(),
                            text: text.to_string(),
                        })));
                    }
                }
                "NICK" if line.nick().is_some_and(|n| n.eq_ignore_ascii_case(nick)) => {
                    if let Some(renamed) = line.param(0) {
                        *nick = renamed.to_string();
                        return Ok(Some(ChatEvent::NickChanged(renamed.to_string())));
                    }
                }
                "ERROR" => {
                    warn!(
                        reason = line.param(0).unwrap_or_default(),
                        "server closed the session"
                    );
                    return Ok(None);
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ChatAdapter for IrcAdapter {
    async fn connect(&mut self) -> Result<String, ChatError> {
        let stream = TcpStream::connect((self.config.server.as_str(), self.config.port)).await?;
        let (reader, writer) = stream.into_split();
        let mut conn = Connection {
            reader: BufReader::new(reader),
            buf: Vec::new(),
            writer,
        };

        self.nick = self.config.nick.clone();
        if let Some(password) = &self.config.password {
            conn.write(&IrcLine::new("PASS", [password.as_str()])).await?;
        }
        conn.write(&IrcLine::new("NICK", [self.nick.as_str()])).await?;
        conn.write(&IrcLine::new(
            "USER",
            [
                self.nick.as_str(),
                "0",
                "*",
                self.config.realname.as_str(),
            ],
        ))
        .await?;

        tokio::time::timeout(
            self.config.register_timeout,
            Self::register(&mut conn, &mut self.nick),
        )
        .await
        .map_err(|_| ChatError::Timeout)??;
        debug!(nick = %self.nick, "registered");

        conn.write(&IrcLine::new("JOIN", [self.config.channel.as_str()]))
            .await?;
        self.conn = Some(conn);
        Ok(self.nick.clone())
    }

    async fn next_event(&mut self) -> Result<Option<ChatEvent>, ChatError> {
        let event = match self.conn.as_mut() {
            Some(conn) => Self::read_event(conn, &mut self.nick).await?,
            None => return Err(ChatError::NotConnected),
        };
        if event.is_none() {
            self.conn = None;
        }
        Ok(event)
    }

    async fn send(&mut self, destination: &str, text: &str) -> Result<(), ChatError> {
        let conn = self.conn.as_mut().ok_or(ChatError::NotConnected)?;
        let text = text.replace(['\r', '\n'], " ");
        conn.write(&IrcLine::new("PRIVMSG", [destination, text.as_str()]))
            .await
    }

    async fn quit(&mut self, reason: &str) -> Result<(), ChatError> {
        let Some(mut conn) = self.conn.take() else {
            return Ok(());
        };
        conn.write(&IrcLine::new("QUIT", [reason])).await?;
        conn.writer.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "irc_tests.rs"]
mod tests;
