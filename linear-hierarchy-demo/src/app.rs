use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, ClearType},
};
use linear_hierarchy::{
    FlowLayout, GridSurface, HierarchyController, HierarchyError, NavigatorConfig, Node, Rgb,
    Selection, Surface,
};
use linear_hierarchy_demo::{CellPaint, CustomCell, CustomCellProvider, fit, header, paint};
use log::{info, warn};

/// Rows above the grid: header and status line.
const HEADER_ROWS: u16 = 2;
const FRAME: Duration = Duration::from_millis(16);
const IDLE: Duration = Duration::from_millis(250);
const HELP: &str =
    "arrows: move  enter: select  backspace: up  a: add  d: delete  r: reduced motion  q: quit";

pub struct App {
    controller: HierarchyController,
    cursor: usize,
    status: Rc<RefCell<String>>,
    added: usize,
    /// Repaint the whole screen, not just the cells that changed.
    full_redraw: bool,
    stdout: io::Stdout,
}

impl App {
    pub fn new(roots: Vec<Node>, config: NavigatorConfig) -> io::Result<Self> {
        let (width, _) = terminal::size()?;
        let layout = FlowLayout::new(CustomCell::default_cell_size(), 1, width);
        let mut controller = HierarchyController::new(roots, GridSurface::with_layout(layout))
            .with_config(config)
            .with_cell_provider(CustomCellProvider);
        controller.load().map_err(io::Error::other)?;

        Ok(Self {
            controller,
            cursor: 0,
            status: Rc::new(RefCell::new(String::new())),
            added: 0,
            full_redraw: true,
            stdout: io::stdout(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.event_loop();

        execute!(
            self.stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        result
    }

    fn event_loop(&mut self) -> io::Result<()> {
        loop {
            let now = Instant::now();
            let completed = self.controller.advance(now).map_err(io::Error::other)?;
            if completed.is_some() || self.controller.is_busy() {
                self.full_redraw = true;
            }
            self.draw(now)?;

            let timeout = if self.controller.is_busy() { FRAME } else { IDLE };
            if !event::poll(timeout)? {
                continue;
            }

            self.full_redraw = true;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !self.on_key(key.code)? {
                        return Ok(());
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let Some(y) = row.checked_sub(HEADER_ROWS) else {
                        continue;
                    };
                    if let Some(index) = self.controller.surface().index_at(column, y) {
                        self.cursor = index;
                        self.select(index)?;
                    }
                }
                Event::Resize(width, _) => self.controller.surface_mut().set_width(width),
                _ => {}
            }
        }
    }

    /// Returns false when the user asked to quit.
    fn on_key(&mut self, code: KeyCode) -> io::Result<bool> {
        let count = self.controller.current_items().len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
            KeyCode::Left | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(count.saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char(' ') if count > 0 => self.select(self.cursor)?,
            KeyCode::Backspace if count > 0 => {
                let status = Rc::clone(&self.status);
                let result = self.controller.collapse(self.cursor, move || {
                    *status.borrow_mut() = "Collapsed".to_string();
                });
                self.report(result)?;
                self.sync_cursor();
            }
            KeyCode::Char('r') => {
                let enabled = !self.controller.config().reduced_motion;
                self.controller.set_reduced_motion(enabled);
                self.set_status(format!("Reduced motion {}", if enabled { "on" } else { "off" }));
            }
            KeyCode::Char('a') => {
                self.added += 1;
                let result = self.controller.insert_dynamic(format!("Item {}", self.added));
                if let Some(index) = self.report(result)? {
                    self.cursor = index;
                }
            }
            KeyCode::Char('d') if count > 0 => {
                let result = self.controller.remove_dynamic(self.cursor);
                if let Some(node) = self.report(result)? {
                    self.set_status(format!("Removed {}", node.name));
                    let remaining = self.controller.current_items().len();
                    self.cursor = self.cursor.min(remaining.saturating_sub(1));
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn select(&mut self, index: usize) -> io::Result<()> {
        let on_expand = Rc::clone(&self.status);
        let on_collapse = Rc::clone(&self.status);
        let result = self.controller.select(
            index,
            move || *on_expand.borrow_mut() = "Expanded".to_string(),
            move || *on_collapse.borrow_mut() = "Collapsed".to_string(),
        );
        if let Some(Selection::Final { name, .. }) = self.report(result)? {
            info!("Final selection: {name}");
            self.set_status(format!("Selected {name}"));
        }
        self.sync_cursor();
        Ok(())
    }

    /// Configuration errors end the demo; anything else goes to the status line.
    fn report<T>(&mut self, result: linear_hierarchy::Result<T>) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_configuration() => Err(io::Error::other(err)),
            Err(err) => {
                warn!("{err}");
                self.set_status(describe(&err));
                Ok(None)
            }
        }
    }

    fn sync_cursor(&mut self) {
        self.cursor = self.controller.state().active_index().unwrap_or(0);
    }

    fn set_status(&self, message: String) {
        *self.status.borrow_mut() = message;
    }

    /// Repaint the screen, or only the changed cells when nothing else moved.
    fn draw(&mut self, now: Instant) -> io::Result<()> {
        let full = std::mem::take(&mut self.full_redraw);
        let cells: Vec<CellPaint> = paint(&self.controller, now, self.cursor)
            .into_iter()
            .filter(|cell| full || cell.dirty)
            .collect();
        if !full && cells.is_empty() {
            return Ok(());
        }

        if full {
            let (_, height) = terminal::size()?;
            queue!(
                self.stdout,
                ResetColor,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                SetAttribute(Attribute::Bold),
                Print(header(&self.controller)),
                SetAttribute(Attribute::Reset),
                cursor::MoveTo(0, 1),
                Print(self.status.borrow().as_str()),
                cursor::MoveTo(0, height.saturating_sub(1)),
                Print(HELP)
            )?;
        }
        for cell in &cells {
            self.draw_cell(cell)?;
        }
        self.stdout.flush()?;

        for cell in self.controller.surface_mut().visible_cells_mut() {
            cell.mark_displayed();
        }
        Ok(())
    }

    fn draw_cell(&mut self, cell: &CellPaint) -> io::Result<()> {
        let width = cell.rect.width as usize;
        let middle = cell.rect.height / 2;
        queue!(
            self.stdout,
            SetBackgroundColor(to_crossterm(cell.background)),
            SetForegroundColor(to_crossterm(cell.foreground))
        )?;
        if cell.focused {
            queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
        }
        for row in 0..cell.rect.height {
            let text = if row == middle {
                fit(&cell.title, width)
            } else {
                " ".repeat(width)
            };
            queue!(
                self.stdout,
                cursor::MoveTo(cell.rect.x, cell.rect.y + HEADER_ROWS + row),
                Print(text)
            )?;
        }
        queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

fn describe(err: &HierarchyError) -> String {
    match err {
        HierarchyError::NotEditable => "This level does not accept new items".to_string(),
        HierarchyError::StaticNode { name } => format!("{name} is fixed and cannot be deleted"),
        other => other.to_string(),
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
