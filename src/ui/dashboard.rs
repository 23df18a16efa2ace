//! The channel bar dashboard
//!
//! Each visible channel gets a 9 cell wide column, drawn upward from its
//! label row:
//!
//! ```text
//!  RECORD     record row
//!  L┌M-┐R     mute row, record side markers
//!    │##│     bar, `bar_height` rows
//!    └──┘
//!  100<>100   values
//!  Master     label
//! ```

use crate::model::action::View;
use crate::model::MixerModel;
use crate::ui::theme::{DrawContext, Theme};
use ratatui::{buffer::Buffer, layout::Rect, symbols::line, widgets::Widget};

const TITLE: &str = concat!("ALMixer v", env!("CARGO_PKG_VERSION"));
/// Width of a channel label
const LABEL_WIDTH: usize = 8;

pub struct Dashboard<'a> {
    model: &'a MixerModel,
    theme: Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(model: &'a MixerModel, theme: Theme) -> Self {
        Self { model, theme }
    }
}

/// Clipping pen over a buffer area; coordinates are relative to the area
struct Pen<'b> {
    buf: &'b mut Buffer,
    area: Rect,
    theme: Theme,
}

impl<'b> Pen<'b> {
    fn put(&mut self, x: i32, y: i32, symbol: &str, dc: DrawContext) {
        if x < 0 || y < 0 || x >= i32::from(self.area.width) || y >= i32::from(self.area.height) {
            return;
        }
        let pos = (self.area.x + x as u16, self.area.y + y as u16);
        let style = self.theme.style(dc);
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    fn ch(&mut self, x: i32, y: i32, c: char, dc: DrawContext) {
        let mut tmp = [0u8; 4];
        self.put(x, y, c.encode_utf8(&mut tmp), dc);
    }

    fn text(&mut self, x: i32, y: i32, s: &str, dc: DrawContext) {
        for (i, c) in s.chars().enumerate() {
            self.ch(x + i as i32, y, c, dc);
        }
    }

    fn blank(&mut self, x: i32, y: i32, width: i32, dc: DrawContext) {
        for i in 0..width {
            self.put(x + i, y, " ", dc);
        }
    }
}

/// Center a channel name in a label, truncating long names
fn label(name: &str) -> String {
    let name: String = name.chars().take(LABEL_WIDTH).collect();
    let pad = (LABEL_WIDTH - name.chars().count()) / 2;
    format!("{:pad$}{:<width$}", "", name, pad = pad, width = LABEL_WIDTH - pad)
}

impl Dashboard<'_> {
    fn draw_column(&self, pen: &mut Pen, index: usize, x: i32, y: i32) {
        use DrawContext::*;

        let model = self.model;
        let info = &model.channels()[index];
        let state = model.state(index).copied().unwrap_or_default();
        let layout = model.layout();
        let height = i32::from(layout.bar_height);
        let mut y = y;

        // name
        let dc = if index == model.focus() {
            CbarFocusLabel
        } else {
            CbarLabel
        };
        pen.text(x, y, &label(&info.name), dc);
        y -= 1;

        // current values
        let values = model.display_values(index);
        pen.blank(x, y, 9, Back);
        let left = values.left.to_string();
        pen.text(x + 3 - left.len() as i32, y, &left, Text);
        pen.ch(x + 3, y, '<', DrawContext::CBAR_FRAME);
        pen.ch(x + 4, y, '>', DrawContext::CBAR_FRAME);
        pen.text(x + 5, y, &values.right.to_string(), Text);
        y -= 1;

        // bar
        let frame = DrawContext::CBAR_FRAME;
        pen.blank(x, y, 9, frame);
        pen.put(x + 2, y, line::BOTTOM_LEFT, frame);
        pen.put(x + 3, y, line::HORIZONTAL, frame);
        pen.put(x + 4, y, line::HORIZONTAL, frame);
        pen.put(x + 5, y, line::BOTTOM_RIGHT, frame);
        y -= 1;

        let percent = model.bar_percent(index);
        for i in 0..height {
            pen.blank(x, y, 9, frame);
            pen.put(x + 2, y, line::VERTICAL, frame);
            pen.put(x + 5, y, line::VERTICAL, frame);

            let level = (i + 1) as f32;
            let full = if level >= 0.8 * height as f32 {
                CbarFull3
            } else if level >= 0.4 * height as f32 {
                CbarFull2
            } else {
                CbarFull1
            };
            let threshold = i64::from(i * 100 / height);
            for (dx, value) in [(3, percent.left), (4, percent.right)] {
                let dc = if value > threshold { full } else { CbarEmpty };
                pen.ch(x + dx, y, dc.ch(), dc);
            }
            y -= 1;
        }

        // muted?
        pen.blank(x, y, 9, Back);
        if let Some(out) = &info.output {
            let muted = state.output.map(|o| o.muted).unwrap_or_default();
            pen.put(x + 2, y, line::TOP_LEFT, frame);
            for (dx, m) in [(3, muted.left), (4, muted.right)] {
                if !out.has_mute {
                    pen.put(x + dx, y, line::HORIZONTAL, frame);
                    continue;
                }
                let dc = if m { CbarMute } else { CbarNoMute };
                pen.ch(x + dx, y, dc.ch(), dc);
            }
            pen.put(x + 5, y, line::TOP_RIGHT, frame);
        }
        y -= 1;

        // record input?
        pen.blank(x, y, 9, Back);
        if let (Some(inp), Some(s)) = (&info.input, state.input) {
            if inp.has_record {
                if s.is_recording() {
                    pen.text(x + 1, y, "RECORD", CbarRecord);
                    if s.record.left {
                        if s.route.left_to_right {
                            pen.ch(x + 6, y + 2, 'L', CbarRecord);
                        } else {
                            pen.ch(x + 1, y + 1, 'L', CbarRecord);
                        }
                    }
                    if s.record.right {
                        if s.route.right_to_left {
                            pen.ch(x + 1, y + 2, 'R', CbarRecord);
                        } else {
                            pen.ch(x + 6, y + 1, 'R', CbarRecord);
                        }
                    }
                } else {
                    for i in 0..6 {
                        pen.ch(x + 1 + i, y, CbarNoRecord.ch(), CbarNoRecord);
                    }
                }
            }
        }
    }

    fn draw_frame(&self, pen: &mut Pen) {
        use DrawContext::*;

        let layout = self.model.layout();
        let max_x = i32::from(layout.max_x);
        let max_y = i32::from(layout.max_y);
        let frame = DrawContext::FRAME;

        pen.put(0, 0, line::TOP_LEFT, frame);
        pen.put(0, max_y - 1, line::BOTTOM_LEFT, frame);
        pen.put(max_x - 1, max_y - 1, line::BOTTOM_RIGHT, frame);
        pen.put(max_x - 1, 0, line::TOP_RIGHT, frame);
        for y in 1..max_y - 1 {
            pen.put(0, y, line::VERTICAL, frame);
            pen.put(max_x - 1, y, line::VERTICAL, frame);
        }
        for x in 1..max_x - 1 {
            pen.put(x, 0, line::HORIZONTAL, frame);
            pen.put(x, max_y - 1, line::HORIZONTAL, frame);
        }

        // program title
        let len = TITLE.len() as i32;
        let start = max_x / 2 - len / 2;
        pen.ch(start - 1, 0, '[', frame);
        pen.ch(start + len, 0, ']', frame);
        pen.text(start, 0, TITLE, Text);

        // card and chip names
        let room = (max_x - 2 - 6 - 2).max(0) as usize;
        let card: String = self.model.card_name.chars().take(room).collect();
        let chip: String = self.model.chip_name.chars().take(room).collect();
        pen.text(2, 1, "Card:", Prompt);
        pen.text(2 + 6, 1, &card, Text);
        pen.text(2, 2, "Chip:", Prompt);
        pen.text(2 + 6, 2, &chip, Text);

        if self.model.view() == View::Record {
            pen.text(2, 3, "Record mixer", Text);
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut pen = Pen {
            buf,
            area,
            theme: self.theme,
        };

        for y in 0..i32::from(area.height) {
            pen.blank(0, y, i32::from(area.width), DrawContext::Back);
        }

        let layout = *self.model.layout();
        let first = self.model.first_visible();
        for index in self.model.visible() {
            if let Some((x, y)) = layout.position(first, index) {
                self.draw_column(&mut pen, index, i32::from(x), i32::from(y));
            }
        }

        // focus markers around the focused label
        if let Some((x, y)) = layout.position(first, self.model.focus()) {
            let (x, y) = (i32::from(x), i32::from(y));
            pen.ch(x - 1, y, '<', DrawContext::Focus);
            pen.ch(x + 8, y, '>', DrawContext::Focus);
        }

        self.draw_frame(&mut pen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action::{Action, Sides};
    use crate::model::channel::{
        ChannelInfo, ChannelState, InputInfo, InputState, OutputState, Range, Route, Stereo,
    };
    use crate::model::layout::Layout;

    fn render(model: &MixerModel, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Dashboard::new(model, Theme::new(true)).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn span(buf: &Buffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn cell(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    fn model() -> MixerModel {
        let channels = vec![
            ChannelInfo::playback("Master", Range::new(0, 100), true),
            ChannelInfo::playback("Line", Range::new(0, 100), true).with_input(InputInfo {
                range: Range::new(0, 100),
                has_volume: true,
                has_record: true,
                has_route: true,
            }),
        ];
        let mut m = MixerModel::new("Test Card".into(), "Test Chip".into(), channels, false);
        m.set_state(
            0,
            ChannelState {
                output: Some(OutputState {
                    volume: Stereo { left: 100, right: 50 },
                    muted: Stereo { left: true, right: false },
                }),
                input: None,
            },
        );
        m.set_state(
            1,
            ChannelState {
                output: Some(OutputState::default()),
                input: Some(InputState {
                    volume: Stereo::both(30),
                    record: Stereo { left: true, right: true },
                    route: Route {
                        left_to_right: false,
                        right_to_left: true,
                    },
                }),
            },
        );
        m.resize(80, 19);
        m
    }

    #[test]
    fn header() {
        let buf = render(&model(), 80, 19);
        assert!(row(&buf, 0).contains("[ALMixer v"));
        assert!(row(&buf, 1).starts_with("│ Card: Test Card"));
        assert!(row(&buf, 2).starts_with("│ Chip: Test Chip"));
        assert!(!row(&buf, 3).contains("Record mixer"));
        assert_eq!(cell(&buf, 0, 0), "┌");
        assert_eq!(cell(&buf, 79, 18), "┘");
    }

    #[test]
    fn labels_and_focus() {
        let buf = render(&model(), 80, 19);
        let layout = Layout::compute(80, 19, 2);
        let (x, y) = layout.column_pos(0);
        let labels = row(&buf, y);
        assert!(labels.contains(" Master "));
        assert!(labels.contains("  Line  "));
        assert_eq!(cell(&buf, x - 1, y), "<");
        assert_eq!(cell(&buf, x + 8, y), ">");
        // the focused label is drawn in the focus style
        let focus = Theme::new(true).style(DrawContext::CbarFocusLabel);
        assert_eq!(buf[(x + 1, y)].fg, focus.fg.unwrap());
    }

    #[test]
    fn bars_fill_by_percent() {
        let buf = render(&model(), 80, 19);
        let (x, y) = Layout::compute(80, 19, 2).column_pos(0);
        // values row
        assert_eq!(span(&buf, x, y - 1, 8), "100<>50 ");
        // left is full: every bar row filled
        for i in 0..10 {
            assert_eq!(cell(&buf, x + 3, y - 3 - i), "#");
        }
        // right is at 50%: rows 0..=4 filled, row 5 empty
        assert_eq!(cell(&buf, x + 4, y - 3 - 4), "#");
        assert_eq!(cell(&buf, x + 4, y - 3 - 5), " ");
        // mute row
        let mute = y - 3 - 10;
        assert_eq!(cell(&buf, x + 2, mute), "┌");
        assert_eq!(cell(&buf, x + 3, mute), "M");
        assert_eq!(cell(&buf, x + 4, mute), "-");
    }

    #[test]
    fn top_of_bar_is_red() {
        let buf = render(&model(), 80, 19);
        let (x, y) = Layout::compute(80, 19, 2).column_pos(0);
        let red = Theme::new(true).style(DrawContext::CbarFull3).fg.unwrap();
        let white = Theme::new(true).style(DrawContext::CbarFull1).fg.unwrap();
        assert_eq!(buf[(x + 3, y - 3 - 9)].fg, red);
        assert_eq!(buf[(x + 3, y - 3)].fg, white);
    }

    #[test]
    fn record_row_and_routing() {
        let buf = render(&model(), 80, 19);
        let (x, y) = Layout::compute(80, 19, 2).column_pos(1);
        let record = y - 3 - 10 - 1;
        assert_eq!(span(&buf, x + 1, record, 6), "RECORD");
        // left side not routed: next to the mute row
        assert_eq!(cell(&buf, x + 1, record + 1), "L");
        // right side routed to the left: moved down to the bar top
        assert_eq!(cell(&buf, x + 1, record + 2), "R");
        assert_eq!(cell(&buf, x + 6, record + 1), " ");
        // playback-only channel has no record row
        let (x0, _) = Layout::compute(80, 19, 2).column_pos(0);
        assert_eq!(span(&buf, x0, record, 9), "         ");
    }

    #[test]
    fn record_view_shows_input_values() {
        let mut m = model();
        m.update(Action::FocusNext);
        m.update(Action::ToggleRecord(Sides::Both));
        m.take_delta();
        let buf = render(&m, 80, 19);
        assert!(row(&buf, 3).contains("Record mixer"));
        let (x, y) = Layout::compute(80, 19, 2).column_pos(1);
        assert_eq!(span(&buf, x + 1, y - 1, 6), "30<>30");
    }

    #[test]
    fn not_recording_shows_dashes() {
        let mut m = model();
        let mut s = *m.state(1).unwrap();
        s.input.as_mut().unwrap().record = Stereo::both(false);
        m.set_state(1, s);
        let buf = render(&m, 80, 19);
        let (x, y) = Layout::compute(80, 19, 2).column_pos(1);
        let record = y - 3 - 10 - 1;
        assert_eq!(span(&buf, x + 1, record, 6), "------");
    }

    #[test]
    fn routed_left_moves_to_the_right_side() {
        let mut m = model();
        let mut s = *m.state(1).unwrap();
        s.input.as_mut().unwrap().route = Route {
            left_to_right: true,
            right_to_left: false,
        };
        m.set_state(1, s);
        let buf = render(&m, 80, 19);
        let (x, y) = Layout::compute(80, 19, 2).column_pos(1);
        let record = y - 3 - 10 - 1;
        assert_eq!(cell(&buf, x + 6, record + 2), "L");
        assert_eq!(cell(&buf, x + 1, record + 1), " ");
        // right stays on its own side
        assert_eq!(cell(&buf, x + 6, record + 1), "R");
    }

    #[test]
    fn no_mute_switch_draws_a_line() {
        let channels = vec![ChannelInfo::playback("Bass", Range::new(0, 15), false)];
        let mut m = MixerModel::new("c".into(), "d".into(), channels, false);
        m.resize(80, 19);
        let buf = render(&m, 80, 19);
        let (x, y) = Layout::compute(80, 19, 1).column_pos(0);
        let mute = y - 3 - 10;
        assert_eq!(cell(&buf, x + 2, mute), "┌");
        assert_eq!(cell(&buf, x + 3, mute), "─");
        assert_eq!(cell(&buf, x + 4, mute), "─");
        assert_eq!(cell(&buf, x + 5, mute), "┐");
    }

    #[test]
    fn small_area_is_clipped() {
        let buf = render(&model(), 10, 5);
        assert_eq!(cell(&buf, 0, 0), "┌");
        assert_eq!(buf.area.width, 10);
    }

    #[test]
    fn labels_are_centered_and_truncated() {
        assert_eq!(label("Line"), "  Line  ");
        assert_eq!(label("PCM"), "  PCM   ");
        assert_eq!(label("Headphone Mic"), "Headphon");
        assert_eq!(label(""), "        ");
    }
}
