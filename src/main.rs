//! Postboard TUI - Actor-based client for a remote post service
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async Post API calls

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use postboard::app::form::PostForm;
use postboard::app::state::{CreatePostState, Dialog, PostListState, Screen};
use postboard::constants::{APP_NAME, REQUIRED_FIELD_MESSAGE};
use postboard::messages::ui_events::{key_to_ui_event, FormField, InputMode, ScreenKind};
use postboard::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use postboard::ui::{centered_rect, format_timestamp, input_cursor, render_input, render_tabs};
use postboard::{AppActor, Config, NetworkActor, PostApiClient};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "postboard.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(api = %config.api_base_url, "Starting postboard");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(PostApiClient::new(&config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen_kind(),
                    current_state.dialog_kind(),
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.is_loading(),
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_nav_bar(f, state, main_chunks[0]);

    match &state.screen {
        Screen::Posts(list) => {
            draw_posts_screen(f, list, &state.api_base_url, main_chunks[1]);
            match &list.dialog {
                Dialog::Closed => {}
                Dialog::Edit { form, .. } => {
                    draw_edit_dialog(f, form, list.is_loading(), state.input_mode, area)
                }
                Dialog::Delete { target } => {
                    draw_delete_dialog(f, list, target.as_deref(), area)
                }
            }
        }
        Screen::Create(create) => {
            draw_create_screen(f, create, state.input_mode, main_chunks[1]);
            if create.is_loading() {
                draw_loading_overlay(f, area);
            }
        }
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, state.screen_kind(), area);
    }
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(APP_NAME.len() as u16 + 3), Constraint::Min(0)])
        .split(area);

    let brand = Paragraph::new(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::White).bold(),
    ));
    f.render_widget(brand, chunks[0]);

    let selected = match state.screen_kind() {
        ScreenKind::Posts => 0,
        ScreenKind::Create => 1,
    };
    f.render_widget(render_tabs(&[" 1:Posts ", " 2:Create Post "], selected), chunks[1]);
}

fn draw_posts_screen(f: &mut Frame, list: &PostListState, api_base_url: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = list
        .posts
        .iter()
        .map(|post| ListItem::new(post.title.as_str()))
        .collect();

    let title = format!(" Posts ({}) ", list.posts.len());
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    if !list.error_message.is_empty() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", list.error_message),
                Style::default().fg(Color::Red),
            ))
            .left_aligned(),
        );
    }

    if items.is_empty() {
        let empty = Paragraph::new("No posts yet.\n\nPress 'n' to create one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, chunks[0]);
    } else {
        let posts = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(list.highlighted));
        f.render_stateful_widget(posts, chunks[0], &mut list_state);
    }

    draw_post_detail(f, list, api_base_url, chunks[1]);
}

fn draw_post_detail(f: &mut Frame, list: &PostListState, api_base_url: &str, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Post ");

    let Some(post) = list.highlighted_post() else {
        f.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(post.title.clone(), Style::default().bold())),
        Line::from(""),
        Line::from(post.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image: ", label),
            Span::styled(post.image_link(api_base_url), Style::default().fg(Color::Cyan)),
        ]),
    ];
    if let Some(created) = &post.created_at {
        lines.push(Line::from(vec![
            Span::styled("Created: ", label),
            Span::raw(format_timestamp(created)),
        ]));
    }
    if let Some(updated) = &post.updated_at {
        lines.push(Line::from(vec![
            Span::styled("Updated: ", label),
            Span::raw(format_timestamp(updated)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("e:edit  d:delete", label)));

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

/// Title, description and image inputs stacked in `area`
fn draw_form_fields(
    f: &mut Frame,
    form: &PostForm,
    input_mode: InputMode,
    image_title: &str,
    missing: Option<FormField>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Description
            Constraint::Length(3), // Image
        ])
        .split(area);

    let editing = input_mode == InputMode::Editing;
    let fields = [
        (FormField::Title, chunks[0]),
        (FormField::Description, chunks[1]),
        (FormField::Image, chunks[2]),
    ];

    for (field, field_area) in fields {
        let title = match field {
            FormField::Image => format!(" {} ", image_title),
            _ => format!(" {} ", field.label()),
        };
        let title = if missing == Some(field) {
            format!("{}- {} ", title, REQUIRED_FIELD_MESSAGE)
        } else {
            title
        };
        let focused = form.focus == field;
        f.render_widget(render_input(form.field(field), title, focused, editing), field_area);

        if focused && editing {
            f.set_cursor_position(input_cursor(field_area, form.field(field), form.cursor));
        }
    }
}

fn draw_create_screen(f: &mut Frame, create: &CreatePostState, input_mode: InputMode, area: Rect) {
    let form_area = centered_rect(70, 90, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Min(9),    // Fields
            Constraint::Length(2), // Error
        ])
        .split(form_area);

    let heading = Paragraph::new(Span::styled(
        "Create New Post",
        Style::default().bold(),
    ));
    f.render_widget(heading, chunks[0]);

    draw_form_fields(
        f,
        &create.form,
        input_mode,
        "Image (file path)",
        create.missing_field,
        chunks[1],
    );

    if !create.error_message.is_empty() {
        let error = Paragraph::new(create.error_message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false });
        f.render_widget(error, chunks[2]);
    }
}

fn draw_edit_dialog(f: &mut Frame, form: &PostForm, is_loading: bool, input_mode: InputMode, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit Post (s:save, Esc:cancel) ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);

    if is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Blue))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, popup_area);
        return;
    }

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);
    draw_form_fields(f, form, input_mode, "New image (blank keeps current)", None, inner);
}

fn draw_delete_dialog(f: &mut Frame, list: &PostListState, target: Option<&str>, area: Rect) {
    let popup_area = centered_rect(50, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete Post ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);

    if list.is_loading() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, popup_area);
        return;
    }

    let title = target
        .and_then(|id| list.find_post(id))
        .map(|post| format!("\"{}\"", post.title))
        .unwrap_or_else(|| String::from("this post"));
    let text = vec![
        Line::from(format!("Are you sure you want to delete {}?", title)),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter:delete  n/Esc:cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let body = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, popup_area);
}

fn draw_loading_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(30, 20, area);
    let overlay = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(overlay, popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading() {
        String::from(" Loading... ")
    } else if state.input_mode == InputMode::Editing {
        String::from(" ESC:stop editing | arrows:move | Tab:next field ")
    } else {
        match &state.screen {
            Screen::Posts(list) => {
                let refreshed = list
                    .last_refreshed
                    .as_ref()
                    .map(|ts| format!(" | refreshed {}", format_timestamp(ts)))
                    .unwrap_or_default();
                format!(" j/k:move | e:edit | d:delete | n:new post | ?:help | q:quit{} ", refreshed)
            }
            Screen::Create(_) => {
                String::from(" Tab:next field | e:edit | s:submit | Esc:back | ?:help | q:quit ")
            }
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, screen: ScreenKind, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = match screen {
        ScreenKind::Posts => {
            r#"
 POSTS - Keyboard Shortcuts

 LIST
   ↑ / k, ↓ / j       Move highlight
   e                  Edit highlighted post
   d                  Delete highlighted post
   2 / n              Create a new post

 EDIT DIALOG
   Tab / Shift+Tab    Switch field
   e / Enter          Edit field
   s                  Save
   Esc                Cancel

 DELETE DIALOG
   y / Enter          Confirm delete
   n / Esc            Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#
        }
        ScreenKind::Create => {
            r#"
 CREATE POST - Keyboard Shortcuts

 FORM
   Tab / Shift+Tab    Switch field
   e / Enter          Edit field
   Esc / Enter        Stop editing
   s                  Submit

 All fields are required. The image field
 takes a path to a local file.

 GENERAL
   1 / Esc            Back to posts
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
