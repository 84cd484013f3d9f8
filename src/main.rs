mod app;
mod config;
mod content;
mod engine;
mod event;
mod generator;
mod keyboard;
mod session;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use config::Config;
use content::ContentRegistry;
use event::{AppEvent, EventHandler};
use keyboard::ime::ImeMode;
use session::game::GamePhase;
use ui::components::combo_meter::ComboMeter;
use ui::components::conveyor::Conveyor;
use ui::components::dashboard::Dashboard;
use ui::components::menu::{Menu, TitleScreen};
use ui::components::plate_bar::PlateBar;
use ui::components::typing_area::InputLine;
use ui::layout::{PlayLayout, pack_hint_lines};
use ui::theme::ThemeColors;

#[derive(Parser)]
#[command(name = "sushida", version, about = "Conveyor-belt sushi typing game")]
struct Cli {
    #[arg(short, long, help = "Start this course right away (EASY, NORMAL, HARD)")]
    course: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Input mode: builtin (2-set Hangul) or system")]
    ime: Option<ImeMode>,

    #[arg(short, long, help = "Seed for item generation")]
    seed: Option<u64>,

    #[arg(long, help = "Log file (the terminal is taken by the game)")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(ime) = cli.ime {
        config.ime = ime;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let log_path = cli.log_file.clone().unwrap_or_else(Config::default_log_path);
    init_logging(&log_path, &config.log_level)?;

    let content = ContentRegistry::load().context("bundled game content is invalid")?;
    let mut app = App::new(config, content);

    if let Some(theme_name) = cli.theme {
        if !app.set_theme(&theme_name) {
            log::warn!("theme '{theme_name}' not found");
        }
    }
    if let Some(course) = cli.course {
        app.start_course(&course);
        if app.phase() != GamePhase::Playing {
            anyhow::bail!("unknown course '{course}'");
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.config.tick_rate());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    app.save_config();

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(path: &Path, default_level: &str) -> Result<()> {
    use env_logger::{Builder, Env, Target};

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        app.on_frame();
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Text(text) => {
                if app.phase() == GamePhase::Playing {
                    app.commit_text(&text);
                }
            }
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.phase() {
        GamePhase::Idle => handle_title_key(app, key),
        GamePhase::Selecting => handle_select_key(app, key),
        GamePhase::Playing => handle_play_key(app, key),
        GamePhase::Ended => handle_result_key(app, key),
    }
}

fn handle_title_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char(' ') => app.open_course_select(),
        _ => {}
    }
}

fn handle_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_title(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.prev_course(),
        KeyCode::Down | KeyCode::Char('j') => app.next_course(),
        KeyCode::Enter => app.start_selected(),
        KeyCode::Char(ch @ '1'..='9') => {
            let idx = ch as usize - '1' as usize;
            if idx < app.game.content().courses().len() {
                app.course_selected = idx;
                app.start_selected();
            }
        }
        _ => {}
    }
}

fn handle_play_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter | KeyCode::Char(' ') => app.commit(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('r') => app.retry(),
        KeyCode::Char('c') => app.open_course_select(),
        KeyCode::Char('t') => app.go_to_title(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.phase() {
        GamePhase::Idle => render_title(frame, app),
        GamePhase::Selecting => render_course_select(frame, app),
        GamePhase::Playing => render_playing(frame, app),
        GamePhase::Ended => render_result(frame, app),
    }
}

fn render_title(frame: &mut ratatui::Frame, app: &App) {
    let centered = ui::layout::centered_rect(50, 60, frame.area());
    frame.render_widget(TitleScreen { theme: app.theme }, centered);
}

fn render_course_select(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let menu = Menu::courses(app.game.content().courses(), app.course_selected, app.theme);
    let menu_area = ui::layout::centered_rect(50, 80, layout[0]);
    frame.render_widget(&menu, menu_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" [1-3/Enter] 시작  [j/k] 이동  [Esc] 처음으로  입력: {} ", app.ime()),
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout[1]);
}

fn render_playing(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let snap = app.snapshot();
    let play = PlayLayout::new(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(play.header);

    let title = snap.course_title.as_deref().unwrap_or_default();
    let time_block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.header_bg()));
    let time_color = if snap.remaining_time <= 10 {
        colors.error()
    } else {
        colors.header_fg()
    };
    let time = Paragraph::new(Line::from(vec![
        Span::styled(" 남은 시간 ", Style::default().fg(colors.header_fg())),
        Span::styled(
            format!("{:03}", snap.remaining_time),
            Style::default().fg(time_color).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(time_block);
    frame.render_widget(time, header[0]);
    frame.render_widget(
        ComboMeter::new(snap.combo_percent, snap.combo, app.theme),
        header[1],
    );

    let plate_color = snap
        .item
        .as_ref()
        .and_then(|item| app.game.content().plate(item.price))
        .map(|plate| ThemeColors::parse_color(&plate.color));
    let conveyor = Conveyor::new(snap.item.as_ref(), &snap.input, snap.composing, app.theme)
        .plate_color(plate_color)
        .bonus(snap.bonus_seconds);
    frame.render_widget(conveyor, play.belt);

    let target = snap.item.as_ref().map(|item| item.word.as_str());
    frame.render_widget(
        InputLine::new(&snap.input, snap.composing, target, app.theme),
        play.input,
    );

    if let Some(plates_area) = play.plates {
        frame.render_widget(
            PlateBar::new(&snap.plate_counts, app.game.content(), snap.score, app.theme),
            plates_area,
        );
    }

    let hints = match app.ime() {
        ImeMode::Builtin => vec!["[Esc] 그만두기", "[Space/Enter] 글자 확정", "[Bksp] 지우기"],
        ImeMode::System => vec!["[Esc] 그만두기", "[Bksp] 지우기"],
    };
    let footer_text = pack_hint_lines(&hints, play.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, play.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let snap = app.snapshot();
    let Some(stats) = snap.stats else {
        return;
    };

    let centered = ui::layout::centered_rect(60, 70, area);
    let dashboard = Dashboard {
        stats,
        course_title: snap.course_title.as_deref().unwrap_or_default(),
        cost: snap.course_cost,
        score: snap.score,
        correct_keys: snap.correct_keys,
        mistypes: snap.mistypes,
        misses: snap.misses,
        plate_counts: &snap.plate_counts,
        content: app.game.content(),
        theme: app.theme,
    };
    frame.render_widget(dashboard, centered);
}
