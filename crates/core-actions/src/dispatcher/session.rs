//! Prompt sessions: incremental search and save-as.

use super::write_and_report;
use crate::find::FindController;
use crate::prompt::{Prompt, PromptEvent};
use core_input::Key;
use core_state::EditorState;
use std::path::PathBuf;

#[derive(Debug)]
pub(crate) enum Session {
    Find { prompt: Prompt, find: FindController },
    SaveAs { prompt: Prompt },
}

impl Session {
    pub(crate) fn find(state: &mut EditorState) -> Self {
        let prompt = Prompt::search();
        state.set_ephemeral(prompt.message());
        Session::Find {
            find: FindController::start(state),
            prompt,
        }
    }

    pub(crate) fn save_as(state: &mut EditorState) -> Self {
        let prompt = Prompt::save_as();
        state.set_ephemeral(prompt.message());
        Session::SaveAs { prompt }
    }

    /// Feed one key; returns the session if it is still open.
    pub(crate) fn feed(self, key: Key, state: &mut EditorState) -> Option<Self> {
        match self {
            Session::Find {
                mut prompt,
                mut find,
            } => match prompt.handle_key(key) {
                PromptEvent::Edited => {
                    find.on_query_changed(state, prompt.input());
                    state.set_ephemeral(prompt.message());
                    Some(Session::Find { prompt, find })
                }
                PromptEvent::Ignored(key) => {
                    find.on_key(state, prompt.input(), key);
                    state.set_ephemeral(prompt.message());
                    Some(Session::Find { prompt, find })
                }
                PromptEvent::Cancelled => {
                    state.clear_ephemeral();
                    find.cancel(state);
                    None
                }
                PromptEvent::Confirmed => {
                    state.clear_ephemeral();
                    find.confirm(state);
                    None
                }
            },
            Session::SaveAs { mut prompt } => match prompt.handle_key(key) {
                PromptEvent::Edited | PromptEvent::Ignored(_) => {
                    state.set_ephemeral(prompt.message());
                    Some(Session::SaveAs { prompt })
                }
                PromptEvent::Cancelled => {
                    state.set_ephemeral("Save aborted");
                    tracing::debug!(target: "io", "save_as_cancelled");
                    None
                }
                PromptEvent::Confirmed => {
                    let name = String::from_utf8_lossy(prompt.input()).into_owned();
                    state.file_name = Some(PathBuf::from(name));
                    state.select_syntax();
                    write_and_report(state);
                    None
                }
            },
        }
    }
}
