use crate::journal_entry::JournalEntry;
use crate::journal_state::JournalStore;
use crate::mood::Mood;
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const INSTRUCTIONS: &str = "Welcome to the Mood Journal!\n\n\
    1. Press 'w' and write about your thoughts or feelings.\n\
    2. Press Esc to run the mood analysis.\n\
    3. Your mood and a suggestion appear on the next screen.\n\
    4. Every entry is saved automatically with its time and analysis.\n\n\
    Use it daily to reflect and track how you're doing.";

pub enum Action {
    Write,
    View,
    Search,
    Help,
    Quit,
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    cursor_position: usize,
    cursor_visible: bool,
    last_cursor_update: Instant,
}

fn title<'a>(text: impl Into<Text<'a>>) -> Paragraph<'a> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}

fn instructions<'a>(text: impl Into<Text<'a>>) -> Paragraph<'a> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
}

pub fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Joy => Color::Yellow,
        Mood::Envy => Color::Cyan,
        Mood::Embarrassment => Color::LightRed,
        Mood::Boredom => Color::Gray,
        Mood::Anxiety => Color::LightMagenta,
        Mood::Fear => Color::Magenta,
        Mood::Disgust => Color::Green,
        Mood::Sadness => Color::Blue,
        Mood::Anger => Color::Red,
    }
}

/// Human-readable score range of a mood's band, e.g. `-0.20 to -0.05`.
pub fn band_description(mood: Mood) -> String {
    match (mood.lower_bound(), mood.upper_bound()) {
        (Some(low), Some(high)) => format!("{low:.2} to {high:.2}"),
        (Some(low), None) => format!("{low:.2} and above"),
        (None, Some(high)) => format!("below {high:.2}"),
        (None, None) => "any score".to_string(),
    }
}

/// First line of `text`, cut to `max_width` terminal columns.
pub fn preview(text: &str, max_width: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    let multiline = text.lines().nth(1).is_some();
    if first.width() <= max_width && !multiline {
        return first.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in first.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

fn byte_index(content: &str, char_pos: usize) -> usize {
    content
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(content.len())
}

fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

fn entry_item(entry: &JournalEntry, width: u16) -> ListItem<'static> {
    let text_width = (width as usize).saturating_sub(2 + 22 + 14 + 2);
    ListItem::new(Line::from(vec![
        Span::raw(format!("[{}] ", entry.formatted_timestamp())),
        Span::styled(
            format!("{:<14}", entry.mood.as_str()),
            Style::default().fg(mood_color(entry.mood)),
        ),
        Span::raw(preview(&entry.text, text_width)),
    ]))
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI {
            terminal,
            cursor_position: 0,
            cursor_visible: true,
            last_cursor_update: Instant::now(),
        })
    }

    pub fn display(&mut self, store: &JournalStore) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            f.render_widget(title("Mood Journal"), chunks[0]);

            let width = chunks[1].width;
            let entries: Vec<ListItem> = store
                .get_entries()
                .iter()
                .rev()
                .map(|entry| entry_item(entry, width))
                .collect();

            let entries_list = List::new(entries).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        "Entries ({}) in {}",
                        store.len(),
                        store.path().display()
                    )),
            );
            f.render_widget(entries_list, chunks[1]);

            let key = |k: &'static str| {
                Span::styled(k, Style::default().add_modifier(Modifier::BOLD))
            };
            let controls = if store.is_empty() {
                Line::from(vec![
                    Span::raw("Press "),
                    key("w"),
                    Span::raw(" to write, "),
                    key("h"),
                    Span::raw(" for help, "),
                    key("q"),
                    Span::raw(" to quit"),
                ])
            } else {
                Line::from(vec![
                    Span::raw("Press "),
                    key("w"),
                    Span::raw(" to write, "),
                    key("v"),
                    Span::raw(" to view, "),
                    key("s"),
                    Span::raw(" to search, "),
                    key("h"),
                    Span::raw(" for help, "),
                    key("q"),
                    Span::raw(" to quit"),
                ])
            };
            f.render_widget(instructions(controls), chunks[2]);
        })?;

        Ok(())
    }

    pub fn handle_input(&self, store: &JournalStore) -> Result<Option<Action>> {
        match event::read()? {
            Event::Key(key) if is_press(&key) => match key.code {
                KeyCode::Char('w') => Ok(Some(Action::Write)),
                KeyCode::Char('h') | KeyCode::Char('?') => Ok(Some(Action::Help)),
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                KeyCode::Char('v') if !store.is_empty() => Ok(Some(Action::View)),
                KeyCode::Char('s') if !store.is_empty() => Ok(Some(Action::Search)),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Multi-line editor. Returns `None` if the user cancels with Ctrl+C.
    pub fn get_new_entry(&mut self) -> Result<Option<String>> {
        let mut content = String::new();

        self.cursor_position = 0;
        let mut last_content_update = Instant::now();
        let mut first_frame = true;

        loop {
            let now = Instant::now();
            let should_update_cursor =
                now.duration_since(self.last_cursor_update) >= Duration::from_millis(500);
            let should_redraw = first_frame
                || should_update_cursor
                || now.duration_since(last_content_update) < Duration::from_millis(50);

            if should_redraw {
                first_frame = false;
                self.terminal.draw(|f| {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .margin(1)
                        .constraints(
                            [
                                Constraint::Length(3),
                                Constraint::Min(10),
                                Constraint::Length(3),
                            ]
                            .as_ref(),
                        )
                        .split(f.area());

                    f.render_widget(title("How was your day?"), chunks[0]);

                    let content_with_cursor = if self.cursor_visible {
                        let mut content_clone = content.clone();
                        content_clone.insert(byte_index(&content, self.cursor_position), '|');
                        content_clone
                    } else {
                        content.clone()
                    };

                    let content_input = Paragraph::new(content_with_cursor)
                        .wrap(Wrap { trim: false })
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title("Put your journal here"),
                        );
                    f.render_widget(content_input, chunks[1]);

                    f.render_widget(
                        instructions("Esc: Analyse mood and save, Ctrl+C: Cancel"),
                        chunks[2],
                    );
                })?;

                if should_update_cursor {
                    self.cursor_visible = !self.cursor_visible;
                    self.last_cursor_update = now;
                }
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if !is_press(&key) {
                        continue;
                    }
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(None);
                        }
                        KeyCode::Char(c) => {
                            content.insert(byte_index(&content, self.cursor_position), c);
                            self.cursor_position += 1;
                        }
                        KeyCode::Enter => {
                            content.insert(byte_index(&content, self.cursor_position), '\n');
                            self.cursor_position += 1;
                        }
                        KeyCode::Backspace => {
                            if self.cursor_position > 0 {
                                content.remove(byte_index(&content, self.cursor_position - 1));
                                self.cursor_position -= 1;
                            }
                        }
                        KeyCode::Left => {
                            self.cursor_position = self.cursor_position.saturating_sub(1);
                        }
                        KeyCode::Right => {
                            if self.cursor_position < content.chars().count() {
                                self.cursor_position += 1;
                            }
                        }
                        KeyCode::Home => self.cursor_position = 0,
                        KeyCode::End => self.cursor_position = content.chars().count(),
                        _ => continue,
                    }
                    last_content_update = Instant::now();
                }
            }
        }

        Ok(Some(content))
    }

    pub fn show_result(&mut self, entry: &JournalEntry) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Min(5),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            f.render_widget(title("Mood Analysis"), chunks[0]);

            let mood = Paragraph::new(entry.mood.as_str())
                .style(
                    Style::default()
                        .fg(mood_color(entry.mood))
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL).title("Mood"));
            f.render_widget(mood, chunks[1]);

            let suggestion = Paragraph::new(entry.suggestion.as_str())
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Suggestion"));
            f.render_widget(suggestion, chunks[2]);

            f.render_widget(
                instructions(format!("Saved at {}. Press any key", entry.formatted_timestamp())),
                chunks[3],
            );
        })?;

        self.wait_for_key()
    }

    pub fn show_warning(&mut self, heading: &str, message: &str) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(5),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            let heading = Paragraph::new(heading)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            f.render_widget(heading, chunks[0]);

            let body = Paragraph::new(message)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(body, chunks[1]);

            f.render_widget(instructions("Press any key"), chunks[2]);
        })?;

        self.wait_for_key()
    }

    pub fn show_instructions(&mut self) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(10),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            f.render_widget(title("How to Use"), chunks[0]);

            let mut lines: Vec<Line> = INSTRUCTIONS.lines().map(Line::from).collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Moods by sentiment score:",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for mood in Mood::ALL {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<14}", mood.as_str()),
                        Style::default().fg(mood_color(mood)),
                    ),
                    Span::raw(band_description(mood)),
                ]));
            }

            let body = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(body, chunks[1]);

            f.render_widget(instructions("Press any key"), chunks[2]);
        })?;

        self.wait_for_key()
    }

    pub fn view_entries(&mut self, store: &JournalStore) -> Result<()> {
        self.browse("View Entries", store.get_entries())
    }

    pub fn get_search_query(&mut self) -> Result<Option<String>> {
        let mut query = String::new();

        loop {
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Length(3),
                            Constraint::Min(1),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                f.render_widget(title("Search Entries"), chunks[0]);

                let search_input = Paragraph::new(query.clone()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Text or mood"),
                );
                f.render_widget(search_input, chunks[1]);

                f.render_widget(instructions("Enter: Submit, Esc: Cancel"), chunks[2]);
            })?;

            if let Event::Key(key) = event::read()? {
                if !is_press(&key) {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => break,
                    KeyCode::Char(c) => query.push(c),
                    KeyCode::Backspace => {
                        query.pop();
                    }
                    KeyCode::Esc => return Ok(None),
                    _ => {}
                }
            }
        }

        Ok(Some(query))
    }

    pub fn display_search_results(&mut self, query: &str, results: &[JournalEntry]) -> Result<()> {
        if results.is_empty() {
            return self.show_warning("No Matches", &format!("Nothing matched \"{query}\"."));
        }
        self.browse(&format!("Search Results: {query}"), results)
    }

    fn browse(&mut self, heading: &str, entries: &[JournalEntry]) -> Result<()> {
        let mut selected_index = 0;

        loop {
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Min(10),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                f.render_widget(title(heading), chunks[0]);

                let width = chunks[1].width.saturating_sub(2);
                let items: Vec<ListItem> = entries
                    .iter()
                    .map(|entry| entry_item(entry, width))
                    .collect();

                let entries_list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title("Entries"))
                    .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                    .highlight_symbol("> ");

                f.render_stateful_widget(
                    entries_list,
                    chunks[1],
                    &mut ListState::default().with_selected(Some(selected_index)),
                );

                f.render_widget(
                    instructions("Up/Down: Navigate, Enter: View full entry, Esc: Back"),
                    chunks[2],
                );
            })?;

            if let Event::Key(key) = event::read()? {
                if !is_press(&key) {
                    continue;
                }
                match key.code {
                    KeyCode::Up => selected_index = selected_index.saturating_sub(1),
                    KeyCode::Down => {
                        if selected_index + 1 < entries.len() {
                            selected_index += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(entry) = entries.get(selected_index) {
                            self.view_full_entry(entry)?;
                        }
                    }
                    KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn view_full_entry(&mut self, entry: &JournalEntry) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(6),
                        Constraint::Length(3),
                        Constraint::Length(4),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            f.render_widget(
                title(format!("Entry from {}", entry.formatted_timestamp())),
                chunks[0],
            );

            let content = Paragraph::new(entry.text.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Journal"));
            f.render_widget(content, chunks[1]);

            let mood = Paragraph::new(entry.mood.as_str())
                .style(Style::default().fg(mood_color(entry.mood)))
                .block(Block::default().borders(Borders::ALL).title("Mood"));
            f.render_widget(mood, chunks[2]);

            let suggestion = Paragraph::new(entry.suggestion.as_str())
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Suggestion"));
            f.render_widget(suggestion, chunks[3]);

            f.render_widget(instructions("Press any key to go back"), chunks[4]);
        })?;

        self.wait_for_key()
    }

    fn wait_for_key(&self) -> Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if is_press(&key) {
                    return Ok(());
                }
            }
        }
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
