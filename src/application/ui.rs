use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::infrastructure::backends::BackendManager;

fn output_block() -> Block<'static> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title("Remixed output")
        .padding(Padding::new(1, 1, 0, 0));
}

fn render_output<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &mut AppState) {
    if app_state.session.output_text.is_empty() {
        frame.render_widget(
            Paragraph::new("Your remixed text will appear here...")
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(output_block()),
            rect,
        );
        return;
    }

    let lines = app_state
        .session
        .as_string_lines(rect.width.saturating_sub(2) as usize)
        .iter()
        .map(|line| return Line::from(line.to_string()))
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines)
            .block(output_block())
            .scroll((app_state.scroll.position, 0)),
        rect,
    );

    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

fn render_error_banner<B: Backend>(frame: &mut Frame<B>, rect: Rect, error: &str) {
    frame.render_widget(
        Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .title("Error"),
            ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let mut constraints = vec![Constraint::Min(1)];
            if app_state.session.error.is_some() {
                constraints.push(Constraint::Max(4));
            }
            constraints.push(Constraint::Max(6));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            render_output(frame, layout[0], app_state);

            if let Some(error) = app_state.session.error.clone() {
                render_error_banner(frame, layout[1], &error);
            }

            let input_rect = *layout.last().unwrap();
            if app_state.session.waiting_for_backend {
                loading.render(frame, input_rect);
            } else {
                frame.render_widget(textarea.widget(), input_rect);
            }
        })?;

        match events.next().await? {
            Event::KeyboardCTRLC() => {
                if app_state.session.waiting_for_backend {
                    app_state.abort(&tx)?;
                } else {
                    break;
                }
            }
            Event::KeyboardEnter() => {
                if app_state.session.waiting_for_backend {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                app_state.submit(&input_str, &tx)?;
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.session.waiting_for_backend {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.session.waiting_for_backend {
                    textarea.insert_str(&text);
                }
            }
            Event::RemixResponse(res) => {
                app_state.handle_response(res);
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let backend = BackendManager::get()?;
    let mut app_state = AppState::new(&backend).await?;
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
