//! The read-eval-print loop.

use crate::command::{is_affirmative, parse_command, Command, HELP};
use crate::render::{render_form, render_notice, render_table};
use policydesk_model::RecordId;
use policydesk_session::Session;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const PROMPT: &str = "> ";

/// Drives a [`Session`] from line-oriented input.
pub struct Console<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Loads the first entity, then handles commands until `quit` or end
    /// of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.session.reload().await;
        self.show_notice().await?;
        self.show_table().await?;

        loop {
            self.write(PROMPT).await?;
            let Some(line) = self.next_line().await? else {
                break;
            };

            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await?,
                Err(e) => self.write(&format!("{e}\n")).await?,
            }
        }
        Ok(())
    }

    /// Applies one command and prints its result.
    pub async fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        debug!("executing {:?}", command);
        match command {
            Command::Tab(key) => {
                self.session.switch_to(key).await;
                self.show_notice().await?;
                self.show_table().await?;
            }
            Command::List => self.show_table().await?,
            Command::Form => self.show_form().await?,
            Command::Set { field, value } => {
                if let Err(e) = self.session.set_field(&field, value) {
                    self.write(&format!("{e}\n")).await?;
                }
            }
            Command::Edit(id) => match self.session.edit(&id) {
                Ok(()) => self.show_form().await?,
                Err(e) => self.write(&format!("{e}\n")).await?,
            },
            Command::Submit => {
                let saved = self.session.submit().await;
                self.show_notice().await?;
                if saved {
                    self.show_table().await?;
                } else {
                    self.show_form().await?;
                }
            }
            Command::Cancel => {
                self.session.cancel();
                self.write("Form cleared\n").await?;
            }
            Command::Delete(id) => self.delete(id).await?,
            Command::Reload => {
                self.session.reload().await;
                self.show_notice().await?;
                self.show_table().await?;
            }
            Command::Help => self.write(&format!("{HELP}\n")).await?,
            Command::Quit => {}
        }
        Ok(())
    }

    async fn delete(&mut self, id: RecordId) -> anyhow::Result<()> {
        let pending = match self.session.request_delete(&id) {
            Ok(pending) => pending,
            Err(e) => return self.write(&format!("{e}\n")).await,
        };

        self.write(&format!("{} [y/N] ", pending.prompt())).await?;
        let answer = self.next_line().await?.unwrap_or_default();
        if !is_affirmative(&answer) {
            return self.write("Delete cancelled\n").await;
        }

        self.session.confirm_delete(pending).await;
        self.show_notice().await?;
        self.show_table().await
    }

    async fn show_table(&mut self) -> anyhow::Result<()> {
        let text = render_table(&self.session.table_view());
        self.write(&text).await
    }

    async fn show_form(&mut self) -> anyhow::Result<()> {
        let text = render_form(&self.session.form_view());
        self.write(&text).await
    }

    async fn show_notice(&mut self) -> anyhow::Result<()> {
        match self.session.notice().map(render_notice) {
            Some(text) => self.write(&text).await,
            None => Ok(()),
        }
    }

    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        Ok((read > 0).then_some(line))
    }

    async fn write(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
