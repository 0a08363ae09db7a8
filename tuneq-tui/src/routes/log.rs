use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};
use tuneq_core::engine::QueueEngineHandle;

use crate::{
    router::{RouteAction, RouteHandler, Tab},
    state::AppState,
};

/// Log route backed by the tui-logger buffer
#[derive(Debug, Clone)]
pub struct LogRoute;

impl RouteHandler for LogRoute {
    fn render(&self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let log_widget = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title(" 📋 Log ")
                    .borders(Borders::ALL)
                    .border_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(false)
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Green))
            .style_debug(Style::default().fg(Color::Cyan))
            .style(Style::default().fg(Color::White));

        frame.render_widget(log_widget, area);
    }

    fn handle_input(
        &mut self,
        _key: KeyCode,
        _state: &mut AppState,
        _handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        Ok(RouteAction::None)
    }

    fn tab(&self) -> Tab {
        Tab::Log
    }

    fn name(&self) -> &str {
        "Log"
    }
}
