use crate::consts;
use crate::game::{Phase, Snapshot};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Size},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Widget,
    },
};

impl Widget for Snapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}   High Score: {}   Speed: {}",
                self.score, self.high_score, self.speed
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = center_rect(board_area, self.board_size());
        let block = Block::bordered();
        let level_area = block.inner(block_area);
        block.render(block_area, buf);
        if self.phase == Phase::NotStarted {
            render_title(level_area, buf);
        } else {
            self.render_level(level_area, buf);
        }

        match self.phase {
            Phase::NotStarted | Phase::Running => {
                movement_hints().render(msg2_area, buf);
            }
            Phase::Paused => {
                Line::from_iter([
                    Span::raw(" Paused - Press '"),
                    Span::styled("P", consts::KEY_STYLE),
                    Span::raw("' to Resume"),
                ])
                .render(msg1_area, buf);
                movement_hints().render(msg2_area, buf);
            }
            Phase::GameOver => {
                Span::styled(" — GAME OVER —", consts::GAME_OVER_STYLE).render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Play Again ("),
                    Span::styled("space", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

impl Snapshot<'_> {
    /// Size of the bordered board.  Each character cell of the braille canvas
    /// holds 2 × 4 grid cells.
    fn board_size(&self) -> Size {
        let columns = u16::try_from(self.grid.columns()).unwrap_or(u16::MAX);
        let rows = u16::try_from(self.grid.rows()).unwrap_or(u16::MAX);
        Size {
            width: columns.div_ceil(2).saturating_add(2),
            height: rows.div_ceil(4).saturating_add(2),
        }
    }

    fn render_level(&self, area: Rect, buf: &mut Buffer) {
        let body = self
            .body
            .iter()
            .map(|&cell| self.grid.plot_point(cell))
            .collect::<Vec<_>>();
        let food = self
            .food
            .map(|cell| self.grid.plot_point(cell))
            .into_iter()
            .collect::<Vec<_>>();
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(self.grid.max_x())])
            .y_bounds([0.0, f64::from(self.grid.max_y())])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &body,
                    color: consts::SNAKE_COLOR,
                });
                ctx.draw(&Points {
                    coords: &food,
                    color: consts::FOOD_COLOR,
                });
            })
            .render(area, buf);
    }
}

fn render_title(area: Rect, buf: &mut Buffer) {
    let [_, title_area, _, prompt_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    Line::from("Welcome to Snake Game!")
        .centered()
        .render(title_area, buf);
    Line::from_iter([
        Span::raw("Press "),
        Span::styled("SPACE", consts::KEY_STYLE),
        Span::raw(" to start"),
    ])
    .centered()
    .render(prompt_area, buf);
}

fn movement_hints() -> Line<'static> {
    Line::from_iter([
        Span::raw(" Move ("),
        Span::styled("← ↓ ↑ →", consts::KEY_STYLE),
        Span::raw(") — Pause ("),
        Span::styled("p", consts::KEY_STYLE),
        Span::raw(") — Quit ("),
        Span::styled("q", consts::KEY_STYLE),
        Span::raw(")"),
    ])
}
