//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // The first screen loads its data before the first frame arrives
        let mount = self.state.mount();
        self.dispatch(mount);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let next = self.state.handle_response(response);
                    self.dispatch(next);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Screens
            UiEvent::Navigate(screen) => {
                let cmd = self.state.navigate(screen);
                self.dispatch(cmd);
            }

            // Post list
            UiEvent::NextPost => self.state.next_post(),
            UiEvent::PrevPost => self.state.prev_post(),
            UiEvent::EditHighlighted => self.state.edit_highlighted(),
            UiEvent::DeleteHighlighted => self.state.delete_highlighted(),

            // Form fields
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Actions
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.dispatch(cmd);
            }
            UiEvent::ConfirmDelete => {
                let cmd = self.state.confirm_delete();
                self.dispatch(cmd);
            }
            UiEvent::CloseDialog => self.state.close_dialog(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::ScreenKind;

    #[tokio::test]
    async fn test_startup_loads_posts_and_quit_shuts_down_network() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(&Config::default(), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::ListPosts { .. })));
        let first = render_rx.recv().await.unwrap();
        assert_eq!(first.screen_kind(), ScreenKind::Posts);

        ui_tx.send(UiEvent::Navigate(ScreenKind::Create)).unwrap();
        let next = render_rx.recv().await.unwrap();
        assert_eq!(next.screen_kind(), ScreenKind::Create);

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }
}
