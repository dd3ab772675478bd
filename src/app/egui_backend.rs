//! eframe/egui implementation of the rasterizer façade and the native window.

use super::shell::Dashboard;
use crate::config::DashboardConfig;
use egui::text::{LayoutJob, TextFormat};
use egui::{
    Color32, CursorIcon, FontData, FontDefinitions, FontFamily, FontId, LayerId, MouseWheelUnit,
    Painter, PointerButton, Pos2, Stroke,
};
use panels::{Color, CursorShape, FontHandle, MouseButton, Rasterizer, Rect, Vec2};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Name the loaded font is registered under
pub const FONT_FAMILY: &str = "dashboard-mono";

/// Wheel travel in points that counts as one notch
const POINTS_PER_NOTCH: f32 = 50.0;

fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn pos2(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(Pos2::new(r.x, r.y), egui::vec2(r.width, r.height))
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

fn cursor_icon(shape: CursorShape) -> CursorIcon {
    match shape {
        CursorShape::Default => CursorIcon::Default,
        CursorShape::ResizeNwse => CursorIcon::ResizeNwSe,
        CursorShape::ResizeEw => CursorIcon::ResizeHorizontal,
        CursorShape::ResizeNs => CursorIcon::ResizeVertical,
    }
}

/// Register `bytes` as the dashboard font, with egui's defaults as glyph fallback
pub fn install_font(ctx: &egui::Context, bytes: Vec<u8>) {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_FAMILY.to_owned(), Arc::new(FontData::from_owned(bytes)));

    let mut chain = vec![FONT_FAMILY.to_owned()];
    if let Some(fallback) = fonts.families.get(&FontFamily::Monospace) {
        chain.extend(fallback.iter().cloned());
    }
    fonts
        .families
        .insert(FontFamily::Name(FONT_FAMILY.into()), chain);

    ctx.set_fonts(fonts);
}

/// Input sampled once at the start of a frame
#[derive(Debug, Clone, Copy)]
struct FrameInput {
    mouse: Vec2,
    pressed: [bool; 3],
    down: [bool; 3],
    wheel: f32,
    screen: Vec2,
}

impl FrameInput {
    fn sample(ctx: &egui::Context) -> Self {
        ctx.input(|i| {
            let mouse = i
                .pointer
                .latest_pos()
                .map(|p| Vec2::new(p.x, p.y))
                .unwrap_or_default();

            let buttons = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
            let pressed = buttons.map(|b| i.pointer.button_pressed(pointer_button(b)));
            let down = buttons.map(|b| i.pointer.button_down(pointer_button(b)));

            let wheel = i
                .events
                .iter()
                .map(|event| match event {
                    egui::Event::MouseWheel { unit, delta, .. } => match unit {
                        MouseWheelUnit::Point => delta.y / POINTS_PER_NOTCH,
                        MouseWheelUnit::Line | MouseWheelUnit::Page => delta.y,
                    },
                    _ => 0.0,
                })
                .sum();

            let screen = i.screen_rect().size();
            Self {
                mouse,
                pressed,
                down,
                wheel,
                screen: Vec2::new(screen.x, screen.y),
            }
        })
    }

    fn index(button: MouseButton) -> usize {
        match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Frame-scoped rasterizer painting onto egui's background layer
pub struct EguiRasterizer {
    ctx: egui::Context,
    painter: Painter,
    clip_stack: Vec<egui::Rect>,
    input: FrameInput,
}

impl EguiRasterizer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            painter: ctx.layer_painter(LayerId::background()),
            clip_stack: Vec::new(),
            input: FrameInput::sample(ctx),
        }
    }

    fn layout(&self, font: FontHandle, text: &str, size: f32, spacing: f32, color: Color) -> LayoutJob {
        let family = if font == FontHandle::default() {
            FontFamily::Name(FONT_FAMILY.into())
        } else {
            FontFamily::Monospace
        };

        let mut job = LayoutJob::default();
        job.append(
            text,
            0.0,
            TextFormat {
                font_id: FontId::new(size, family),
                extra_letter_spacing: spacing,
                color: color32(color),
                ..Default::default()
            },
        );
        job
    }
}

impl Rasterizer for EguiRasterizer {
    fn mouse_position(&self) -> Vec2 {
        self.input.mouse
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.pressed[FrameInput::index(button)]
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.input.down[FrameInput::index(button)]
    }

    fn wheel_move(&self) -> f32 {
        self.input.wheel
    }

    fn screen_size(&self) -> Vec2 {
        self.input.screen
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        self.ctx.set_cursor_icon(cursor_icon(shape));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter.rect_filled(egui_rect(rect), 0.0, color32(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.painter
            .line_segment([pos2(from), pos2(to)], Stroke::new(thickness, color32(color)));
    }

    fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        pos: Vec2,
        size: f32,
        spacing: f32,
        color: Color,
    ) {
        let job = self.layout(font, text, size, spacing, color);
        let galley = self.painter.layout_job(job);
        self.painter.galley(pos2(pos), galley, color32(color));
    }

    fn measure_text(&self, font: FontHandle, text: &str, size: f32, spacing: f32) -> Vec2 {
        let job = self.layout(font, text, size, spacing, Color::rgb(255, 255, 255));
        let galley = self.ctx.fonts(|f| f.layout_job(job));
        let size = galley.size();
        Vec2::new(size.x, size.y)
    }

    fn begin_scissor(&mut self, rect: Rect) {
        self.clip_stack.push(self.painter.clip_rect());
        let clip = egui_rect(rect).intersect(self.painter.clip_rect());
        self.painter.set_clip_rect(clip);
    }

    fn end_scissor(&mut self) {
        if let Some(previous) = self.clip_stack.pop() {
            self.painter.set_clip_rect(previous);
        }
    }
}

/// eframe application driving the dashboard shell
pub struct DashboardApp {
    shell: Dashboard,
    frame_interval: Duration,
}

impl DashboardApp {
    pub fn new(shell: Dashboard, frame_interval: Duration) -> Self {
        Self {
            shell,
            frame_interval,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut rl = EguiRasterizer::new(ctx);
        self.shell.frame(&mut rl);
        ctx.request_repaint_after(self.frame_interval);
    }
}

/// Open the window and block until it is closed
pub fn run(config: &DashboardConfig, font: Vec<u8>, shell: Dashboard) -> anyhow::Result<()> {
    let window = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_resizable(true),
        ..Default::default()
    };

    let app = DashboardApp::new(shell, config.frame_interval());
    info!("Opening {}x{} window", window.width, window.height);

    eframe::run_native(
        &window.title,
        options,
        Box::new(move |cc| {
            install_font(&cc.egui_ctx, font);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window backend failed: {e}"))
}
