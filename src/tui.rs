use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::api::JobBoardClient;
use crate::cities::CityDataset;
use crate::config::Config;
use crate::drafts::{DraftStore, DRAFT_KEY};
use crate::filter::{parse_amount, JobFilter};
use crate::form::{FormField, JobForm, StatusKind, StatusMessage};
use crate::geometry::{format_inr, percent_at_column, truncate};
use crate::location::{LocationConfig, LocationPicker};
use crate::models::{JobPost, JobType};
use crate::range::{Handle, RangeConfig, RangeSelector};
use crate::widgets::{render_location_dropdown, render_location_input, render_range};

#[derive(Debug, Clone, PartialEq, Eq)]
enum BoardEvent {
    Salary(i64, i64),
    Location(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Title,
    Location,
    JobType,
    Salary,
    Jobs,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Title,
        Focus::Location,
        Focus::JobType,
        Focus::Salary,
        Focus::Jobs,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    OpenForm,
    SaveDraft,
    Publish,
}

struct Board {
    jobs: Vec<JobPost>,
    visible: Vec<usize>,
    selected: usize,
    scroll_offset: u16,
    list_state: ListState,
    filter: JobFilter,
    title_query: String,
    location: LocationPicker,
    salary: RangeSelector,
    focus: Focus,
    events: Receiver<BoardEvent>,
    salary_track: Rect,
    dragging: Option<Handle>,
    form: Option<JobForm>,
    status: Option<StatusMessage>,
    dataset: Arc<CityDataset>,
    currency: String,
}

impl Board {
    fn new(jobs: Vec<JobPost>, dataset: Arc<CityDataset>, config: &Config) -> Result<Self> {
        let (tx, events) = mpsc::channel();

        let salary_tx = tx.clone();
        let salary = RangeSelector::new(RangeConfig {
            min: config.salary_min,
            max: config.salary_max,
            initial_low: None,
            initial_high: None,
        })?
        .on_change(move |low, high| {
            let _ = salary_tx.send(BoardEvent::Salary(low, high));
        });

        tracing::debug!(bound = ?salary.bound(), "salary selector ready");

        let location = LocationPicker::new(LocationConfig {
            dataset: Arc::clone(&dataset),
            initial_query: None,
        })
        .on_select(move |city, _region| {
            let _ = tx.send(BoardEvent::Location(city.to_string()));
        });

        let mut board = Self {
            jobs,
            visible: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            list_state: ListState::default(),
            filter: JobFilter::default(),
            title_query: String::new(),
            location,
            salary,
            focus: Focus::Title,
            events,
            salary_track: Rect::default(),
            dragging: None,
            form: None,
            status: None,
            dataset,
            currency: config.currency.clone(),
        };
        board.refilter();
        Ok(board)
    }

    fn current_job(&self) -> Option<&JobPost> {
        self.visible.get(self.selected).and_then(|&i| self.jobs.get(i))
    }

    fn set_jobs(&mut self, jobs: Vec<JobPost>) {
        self.jobs = jobs;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self.filter.apply(&self.jobs);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
        self.scroll_offset = 0;
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(self.selected) });
    }

    fn pump_events(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                BoardEvent::Salary(low, high) => {
                    self.filter.salary = if self.salary.spans_bound() { None } else { Some((low, high)) };
                }
                BoardEvent::Location(city) => self.filter.location = city,
            }
            changed = true;
        }
        if changed {
            self.refilter();
        }
    }

    fn next(&mut self) {
        if !self.visible.is_empty() && self.selected < self.visible.len() - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
            self.list_state.select(Some(self.selected));
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
            self.list_state.select(Some(self.selected));
        }
    }

    fn cycle_job_type(&mut self, forward: bool) {
        self.filter.job_type = match (self.filter.job_type, forward) {
            (None, true) => Some(JobType::FullTime),
            (None, false) => Some(JobType::Internship),
            (Some(JobType::Internship), true) | (Some(JobType::FullTime), false) => None,
            (Some(t), forward) => Some(t.cycle(forward)),
        };
        self.refilter();
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus == Focus::Location && focus != Focus::Location && self.location.is_open() {
            self.location.toggle();
        }
        self.focus = focus;
    }

    // --- Keys ---

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('n') if self.form.is_none() => Action::OpenForm,
                KeyCode::Char('s') if self.form.is_some() => Action::SaveDraft,
                KeyCode::Char('p') if self.form.is_some() => Action::Publish,
                _ => Action::None,
            };
        }

        if self.form.is_some() {
            return self.handle_form_key(key);
        }

        let action = match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focus.step(true));
                Action::None
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.step(false));
                Action::None
            }
            _ => match self.focus {
                Focus::Title => self.title_key(key),
                Focus::Location => self.location_key(key),
                Focus::JobType => self.job_type_key(key),
                Focus::Salary => self.salary_key(key),
                Focus::Jobs => self.jobs_key(key),
            },
        };
        self.pump_events();
        action
    }

    fn title_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => self.title_query.push(c),
            KeyCode::Backspace => {
                self.title_query.pop();
            }
            KeyCode::Enter | KeyCode::Down => {
                self.set_focus(Focus::Jobs);
                return Action::None;
            }
            KeyCode::Esc => return Action::Quit,
            _ => return Action::None,
        }
        self.filter.title = self.title_query.clone();
        self.refilter();
        Action::None
    }

    fn location_key(&mut self, key: KeyEvent) -> Action {
        if edit_location(&mut self.location, key) {
            if self.location.text().is_empty() && !self.filter.location.is_empty() {
                self.filter.location.clear();
                self.refilter();
            }
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn job_type_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.cycle_job_type(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => self.cycle_job_type(true),
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn salary_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.salary.nudge(-1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.salary.nudge(1);
            }
            KeyCode::Char(' ') => self.salary.toggle_active(),
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn jobs_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.prev(),
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(3);
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(3);
            }
            KeyCode::Char('c') => return Action::OpenForm,
            _ => {}
        }
        Action::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            return Action::None;
        };

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                if form.focus == FormField::Location && form.location.is_open() {
                    form.location.toggle();
                }
                form.focus = if key.code == KeyCode::Tab { form.focus.next() } else { form.focus.prev() };
                return Action::None;
            }
            KeyCode::Esc if !(form.focus == FormField::Location && form.location.is_open()) => {
                self.form = None;
                return Action::None;
            }
            _ => {}
        }

        match form.focus {
            FormField::Location => {
                edit_location(&mut form.location, key);
            }
            FormField::JobType => match key.code {
                KeyCode::Left => form.job_type = form.job_type.cycle(false),
                KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                    form.job_type = form.job_type.cycle(true)
                }
                _ => {}
            },
            field => {
                let multiline = field == FormField::Description;
                if let Some(buffer) = form.text_mut(field) {
                    match key.code {
                        KeyCode::Char(c) => buffer.push(c),
                        KeyCode::Backspace => {
                            buffer.pop();
                        }
                        KeyCode::Enter if multiline => buffer.push('\n'),
                        KeyCode::Enter => form.focus = form.focus.next(),
                        _ => {}
                    }
                }
            }
        }
        Action::None
    }

    // --- Mouse ---

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.form.is_some() {
            return;
        }
        let track = self.salary_track;
        if track.width == 0 {
            return;
        }
        let column = mouse.column.clamp(track.x, track.right().saturating_sub(1)) - track.x;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_track = mouse.row == track.y
                    && mouse.column >= track.x
                    && mouse.column < track.right();
                if on_track {
                    self.set_focus(Focus::Salary);
                    let percent = percent_at_column(column, track.width);
                    self.dragging = Some(self.salary.pointer_at(percent, None));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(handle) = self.dragging {
                    let percent = percent_at_column(column, track.width);
                    self.salary.pointer_at(percent, Some(handle));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.dragging = None,
            _ => {}
        }
        self.pump_events();
    }

    // --- Collaborators ---

    fn open_form(&mut self, store: &DraftStore) {
        let form = match store.load(DRAFT_KEY) {
            Ok(Some(draft)) => {
                tracing::info!(saved_at = %draft.saved_at, "loaded draft");
                JobForm::from_draft(Arc::clone(&self.dataset), &draft.post)
            }
            Ok(None) => JobForm::new(Arc::clone(&self.dataset)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load draft");
                let mut form = JobForm::new(Arc::clone(&self.dataset));
                form.status = Some(StatusMessage::error(format!("Error loading draft: {}", e)));
                form
            }
        };
        self.form = Some(form);
    }

    fn save_draft(&mut self, store: &DraftStore) {
        let Some(form) = self.form.as_mut() else { return };
        let result = store.save(DRAFT_KEY, &form.to_draft());
        form.status = Some(match result {
            Ok(()) => StatusMessage::success("Draft saved successfully!"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save draft");
                StatusMessage::error(format!("Error saving draft: {}", e))
            }
        });
    }

    fn publish(&mut self, client: &JobBoardClient, store: &DraftStore) {
        let Some(form) = self.form.as_mut() else { return };
        let post = match form.to_post() {
            Ok(post) => post,
            Err(e) => {
                form.status = Some(StatusMessage::error(e.to_string()));
                return;
            }
        };

        if let Err(e) = client.create_job(&post) {
            tracing::error!(error = %e, "failed to create job");
            form.status = Some(StatusMessage::error(format!("Error creating job post: {}", e)));
            return;
        }

        if let Err(e) = store.clear(DRAFT_KEY) {
            tracing::warn!(error = %e, "failed to clear draft after publishing");
        }
        self.form = None;
        self.status = Some(StatusMessage::success("Job posted successfully!"));

        match client.fetch_jobs() {
            Ok(jobs) => self.set_jobs(jobs),
            Err(e) => self.status = Some(StatusMessage::error(format!("Error fetching jobs: {}", e))),
        }
    }

    // --- Drawing ---

    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let bar = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(28),
                Constraint::Percentage(24),
                Constraint::Percentage(18),
                Constraint::Percentage(30),
            ])
            .split(rows[0]);

        self.draw_title_input(frame, bar[0]);
        render_location_input(
            frame,
            bar[1],
            &self.location,
            "Location",
            "Preferred Location",
            self.focus == Focus::Location,
        );
        self.draw_job_type(frame, bar[2]);
        self.salary_track = render_range(
            frame,
            bar[3],
            &self.salary,
            "Salary Per Month",
            &self.currency,
            self.focus == Focus::Salary,
        );

        self.draw_jobs(frame, rows[1]);
        self.draw_footer(frame, rows[2]);

        render_location_dropdown(frame, bar[1], &self.location);

        if let Some(form) = &self.form {
            draw_form(frame, form);
        }
    }

    fn draw_title_input(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Title;
        let content = if self.title_query.is_empty() {
            Line::from(Span::styled("Search By Job Title, Role", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.title_query.as_str())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(" Search ");
        frame.render_widget(Paragraph::new(content).block(block), area);
    }

    fn draw_job_type(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::JobType;
        let label = self.filter.job_type.map(JobType::label).unwrap_or("All Job Types");
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(" Job Type ");
        frame.render_widget(Paragraph::new(format!("◂ {} ▸", label)).block(block), area);
    }

    fn draw_jobs(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&i| self.jobs.get(i))
            .map(|job| {
                let company = if job.company_name.is_empty() { "?" } else { &job.company_name };
                ListItem::new(format!(
                    "{} | {} | {}",
                    truncate(&job.job_title, 30),
                    truncate(company, 16),
                    truncate(&job.location, 14)
                ))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(self.focus == Focus::Jobs))
                    .title(format!(" Jobs ({}/{}) ", self.visible.len(), self.jobs.len())),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let detail = Paragraph::new(build_detail(self.current_job()))
            .block(Block::default().borders(Borders::ALL).title(" Detail "))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));
        frame.render_widget(detail, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = match &self.status {
            Some(status) => Paragraph::new(format!(" {}", status.text)).style(status_style(status.kind)),
            None => Paragraph::new(
                " Tab:focus  type:search  ↓/↑/Enter:pick city  ←/→:adjust  Space:switch handle  Ctrl-N:create job  q:quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(footer, area);
    }
}

// Shared by the filter bar and the form. Returns whether the picker used the key.
fn edit_location(picker: &mut LocationPicker, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            let text = format!("{}{}", picker.text(), c);
            picker.set_query(text);
        }
        KeyCode::Backspace => {
            let mut text = picker.text().to_string();
            text.pop();
            picker.set_query(text);
        }
        KeyCode::Down if !picker.is_open() => picker.toggle(),
        KeyCode::Down => picker.highlight_next(),
        KeyCode::Up => picker.highlight_prev(),
        KeyCode::Enter => {
            if !picker.select_highlighted() && !picker.is_open() {
                picker.toggle();
            }
        }
        KeyCode::Esc if picker.is_open() => picker.toggle(),
        _ => return false,
    }
    true
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::Blue),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

fn salary_text(job: &JobPost) -> Option<String> {
    let fmt = |raw: &str| parse_amount(raw).map(format_inr);
    match (fmt(&job.min_salary), fmt(&job.max_salary)) {
        (Some(min), Some(max)) => Some(format!("{} - {}", min, max)),
        (Some(min), None) => Some(format!("{}+", min)),
        (None, Some(max)) => Some(format!("up to {}", max)),
        (None, None) => None,
    }
}

fn build_detail(job: Option<&JobPost>) -> Text<'_> {
    let Some(job) = job else {
        return Text::from(vec![
            Line::from("No jobs match your search criteria."),
            Line::from(Span::styled(
                "Try adjusting your search terms or location.",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        &job.job_title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if !job.company_name.is_empty() {
        lines.push(Line::from(format!("at {}", job.company_name)));
    }
    if let Some(id) = &job.id {
        lines.push(Line::from(Span::styled(
            format!("Posting #{}", id),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    if !job.job_type.is_empty() {
        let label = JobType::parse(&job.job_type)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| job.job_type.clone());
        lines.push(Line::from(format!("Type: {}", label)));
    }
    if !job.location.is_empty() {
        lines.push(Line::from(format!("Location: {}", job.location)));
    }
    if !job.experience_level.is_empty() {
        lines.push(Line::from(format!("Experience: {} yrs", job.experience_level)));
    }
    if let Some(pay) = salary_text(job) {
        lines.push(Line::from(Span::styled(
            format!("Salary: {}", pay),
            Style::default().fg(Color::Green),
        )));
    }
    if !job.application_deadline.is_empty() {
        let deadline = job.application_deadline.split('T').next().unwrap_or_default();
        lines.push(Line::from(format!("Apply by: {}", deadline)));
    }
    lines.push(Line::from(""));

    if job.job_description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "(No description)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for line in textwrap::fill(&job.job_description, 70).lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    Text::from(lines)
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_form(frame: &mut Frame, form: &JobForm) {
    let area = centered(frame.area(), 80, 90);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(" Create Job Opening ").centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(status) = &form.status {
        frame.render_widget(
            Paragraph::new(status.text.as_str()).style(status_style(status.kind)).centered(),
            rows[0],
        );
    }

    let halves = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };

    let first = halves(rows[1]);
    draw_field(frame, first[0], form, FormField::Title);
    draw_field(frame, first[1], form, FormField::Company);

    let second = halves(rows[2]);
    render_location_input(
        frame,
        second[0],
        &form.location,
        FormField::Location.label(),
        FormField::Location.placeholder(),
        form.focus == FormField::Location,
    );
    draw_field(frame, second[1], form, FormField::JobType);

    let third = halves(rows[3]);
    let salaries = halves(third[0]);
    draw_field(frame, salaries[0], form, FormField::MinSalary);
    draw_field(frame, salaries[1], form, FormField::MaxSalary);
    draw_field(frame, third[1], form, FormField::Deadline);

    draw_field(frame, rows[4], form, FormField::Description);

    frame.render_widget(
        Paragraph::new(" Tab:next field  Ctrl-S:save draft  Ctrl-P:publish  Esc:close")
            .style(Style::default().fg(Color::DarkGray)),
        rows[5],
    );

    render_location_dropdown(frame, second[0], &form.location);
}

fn draw_field(frame: &mut Frame, area: Rect, form: &JobForm, field: FormField) {
    let focused = form.focus == field;
    let value = form.text(field);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(format!(" {} ", field.label()));

    let text = if field == FormField::JobType {
        Text::from(format!("◂ {} ▸", value))
    } else if value.is_empty() {
        Text::from(Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(value.to_string())
    };
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

pub fn run_browse(config: &Config, dataset: Arc<CityDataset>) -> Result<()> {
    let client = JobBoardClient::new(&config.api_url);
    let store = DraftStore::open(&config.drafts_path())?;

    let (jobs, status) = match client.fetch_jobs() {
        Ok(jobs) => (jobs, None),
        Err(e) => {
            tracing::error!(error = %e, "error fetching jobs");
            (Vec::new(), Some(StatusMessage::error(format!("Error fetching jobs: {}", e))))
        }
    };

    let mut board = Board::new(jobs, dataset, config)?;
    board.status = status;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut board, &client, &store);

    // Restore terminal
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    board: &mut Board,
    client: &JobBoardClient,
    store: &DraftStore,
) -> Result<()> {
    loop {
        terminal.draw(|frame| board.draw(frame))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match board.handle_key(key) {
                    Action::Quit => break,
                    Action::OpenForm => board.open_form(store),
                    Action::SaveDraft => board.save_draft(store),
                    Action::Publish => {
                        if let Some(form) = board.form.as_mut() {
                            form.status = Some(StatusMessage::info("Submitting job posting..."));
                        }
                        terminal.draw(|frame| board.draw(frame))?;
                        board.publish(client, store);
                    }
                    Action::None => {}
                }
            }
            Event::Mouse(mouse) => board.handle_mouse(mouse),
            _ => {}
        }
    }
    Ok(())
}
