/*!
 * Interactive WorldPop dashboard
 *
 * The same page the `worldpop render` command draws, live:
 * - Metric toggle for the evolution chart, with hover tooltips
 * - Continent donut with hover readout
 * - Region filter for the country ranking
 * - Export of the current view to PNG/SVG
 */

use eframe::egui::{
    self, Align, Align2, Color32, FontId, Layout, Mesh, Pos2, Rect, RichText, Rounding, Sense,
    Shape, Stroke, pos2, vec2,
};
use num_format::Locale;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use worldpop::dashboard::{
    AreaChartView, BRAND, BRAND_SUFFIX, CountryChart, DISTRIBUTION_SUBTITLE, DISTRIBUTION_TITLE,
    DonutView, EVOLUTION_SUBTITLE, EVOLUTION_TITLE, HEADING, LIVE_BADGE, RANKING_SUBTITLE,
    RANKING_TITLE, SUBHEADING,
};
use worldpop::models::{Icon, Metric, RegionFilter, Rgb};
use worldpop::stat_card::StatCardView;
use worldpop::tooltip::TooltipView;
use worldpop::viz::area::{PROJECTION_LABEL, fade_stops};
use worldpop::viz::bars::{BarRow, NAME_COLUMN, row_at};
use worldpop::viz::curve::monotone_x;
use worldpop::viz::donut::{INNER_RADIUS, OUTER_RADIUS, hit, ring_sector};
use worldpop::viz::util::{
    EMERALD_100, EMERALD_700, INDIGO_600, SLATE_100, SLATE_200, SLATE_400, SLATE_50, SLATE_500,
    SLATE_600, SLATE_700, SLATE_800, format_tick, map_locale, nice_ceiling,
};
use worldpop::viz::{self, RenderOptions};
use worldpop::{DashboardState, DashboardView};

const GAP: f32 = 24.0;
const EVOLUTION_HEIGHT: f32 = 300.0;
const DONUT_HEIGHT: f32 = 250.0;
const BAR_BAND: f32 = 32.0;
const BAR_SIZE: f32 = 20.0;
const Y_TICKS: usize = 5;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("WorldPop Analytics"),
        ..Default::default()
    };

    eframe::run_native(
        "WorldPop Analytics",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new()))),
    )
}

fn color(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn faded(c: Rgb, alpha: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[derive(Debug)]
enum ExportResult {
    Success(String),
    Error(String),
}

struct DashboardApp {
    state: DashboardState,
    locale: String,

    is_exporting: bool,
    status_message: String,
    error_message: String,
    export_receiver: Option<mpsc::Receiver<ExportResult>>,
}

impl DashboardApp {
    fn new() -> Self {
        Self {
            state: DashboardState::new(),
            locale: "en".to_string(),
            is_exporting: false,
            status_message: String::new(),
            error_message: String::new(),
            export_receiver: None,
        }
    }

    fn start_export(&mut self) {
        let default_dir = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&default_dir)
            .set_file_name("worldpop.png")
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .save_file()
        else {
            return;
        };

        self.is_exporting = true;
        self.error_message.clear();
        self.status_message = "Rendering dashboard...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.export_receiver = Some(receiver);

        let view = self.state.view();
        let opts = RenderOptions {
            locale: self.locale.clone(),
            ..Default::default()
        };
        thread::spawn(move || {
            let result = match viz::render_dashboard(&view, &path, &opts) {
                Ok(()) => ExportResult::Success(format!("Saved {}", path.display())),
                Err(err) => ExportResult::Error(format!("Export failed: {:#}", err)),
            };
            let _ = sender.send(result);
        });
    }

    fn check_export_result(&mut self) {
        if let Some(receiver) = &self.export_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_exporting = false;
            self.export_receiver = None;

            match result {
                ExportResult::Success(message) => {
                    self.status_message = message;
                    self.error_message.clear();
                }
                ExportResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    fn nav_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (badge, _) = ui.allocate_exact_size(vec2(36.0, 36.0), Sense::hover());
            ui.painter().rect_filled(badge, 8.0, color(INDIGO_600));
            ui.painter().text(
                badge.center(),
                Align2::CENTER_CENTER,
                Icon::Globe.glyph(),
                FontId::proportional(20.0),
                Color32::WHITE,
            );
            ui.label(RichText::new(BRAND).size(20.0).strong().color(color(INDIGO_600)));
            ui.label(RichText::new(BRAND_SUFFIX).size(20.0).color(color(SLATE_400)));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(Icon::Activity.glyph().to_string())
                        .size(20.0)
                        .color(color(SLATE_400)),
                );
                egui::Frame::none()
                    .fill(color(EMERALD_100))
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(12.0, 4.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(LIVE_BADGE).size(12.0).color(color(EMERALD_700)));
                    });

                ui.add_space(16.0);
                if ui
                    .add_enabled(!self.is_exporting, egui::Button::new("Export chart…"))
                    .clicked()
                {
                    self.start_export();
                }
                if self.is_exporting {
                    ui.spinner();
                }

                egui::ComboBox::from_label("")
                    .selected_text(self.locale.as_str())
                    .show_ui(ui, |ui| {
                        for tag in ["en", "de", "fr", "es", "it", "pt", "nl"] {
                            ui.selectable_value(&mut self.locale, tag.to_string(), tag);
                        }
                    });
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_export_result();
        if self.is_exporting {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("nav")
            .frame(
                egui::Frame::none()
                    .fill(Color32::WHITE)
                    .stroke(Stroke::new(1.0, color(SLATE_200)))
                    .inner_margin(egui::Margin::symmetric(32.0, 14.0)),
            )
            .show(ctx, |ui| self.nav_bar(ui));

        let view = self.state.view();
        let locale = map_locale(&self.locale);
        let mut chosen_metric: Option<Metric> = None;
        let mut chosen_region: Option<RegionFilter> = None;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(color(SLATE_50))
                    .inner_margin(egui::Margin::symmetric(32.0, GAP)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if !self.status_message.is_empty() {
                        ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                    }
                    if !self.error_message.is_empty() {
                        ui.colored_label(egui::Color32::RED, &self.error_message);
                    }

                    ui.label(RichText::new(HEADING).size(24.0).strong().color(color(SLATE_800)));
                    ui.label(RichText::new(SUBHEADING).size(14.0).color(color(SLATE_500)));
                    ui.add_space(GAP);

                    ui.columns(4, |cols| {
                        for (col, card) in cols.iter_mut().zip(&view.cards) {
                            stat_card(col, card);
                        }
                    });
                    ui.add_space(GAP);

                    let full = ui.available_width();
                    let left_w = (full - GAP) * 2.0 / 3.0;
                    let right_w = full - GAP - left_w;
                    ui.horizontal_top(|ui| {
                        ui.allocate_ui(vec2(left_w, 0.0), |ui| {
                            ui.set_width(left_w);
                            panel(
                                ui,
                                EVOLUTION_TITLE,
                                EVOLUTION_SUBTITLE,
                                |ui| {
                                    for toggle in view.metric_toggles.iter().rev() {
                                        if ui.selectable_label(toggle.active, toggle.label).clicked() {
                                            chosen_metric = Some(toggle.metric);
                                        }
                                    }
                                },
                                |ui| evolution_chart(ui, &view.evolution, locale),
                            );
                        });
                        ui.add_space(GAP);
                        ui.allocate_ui(vec2(right_w, 0.0), |ui| {
                            ui.set_width(right_w);
                            panel(
                                ui,
                                DISTRIBUTION_TITLE,
                                DISTRIBUTION_SUBTITLE,
                                |_| {},
                                |ui| donut_chart(ui, &view.distribution),
                            );
                        });
                    });
                    ui.add_space(GAP);

                    panel(
                        ui,
                        RANKING_TITLE,
                        RANKING_SUBTITLE,
                        |ui| {
                            for button in view.region_buttons.iter().rev() {
                                if ui.selectable_label(button.active, button.label).clicked() {
                                    chosen_region = Some(button.filter);
                                }
                            }
                        },
                        |ui| ranking(ui, &view),
                    );
                });
            });

        if let Some(metric) = chosen_metric {
            self.state.select_metric(metric);
        }
        if let Some(region) = chosen_region {
            self.state.select_region(region);
        }
    }
}

/// White rounded panel with title, subtitle, controls at the top right, then the body.
fn panel<R>(
    ui: &mut egui::Ui,
    title: &str,
    subtitle: &str,
    controls: impl FnOnce(&mut egui::Ui),
    body: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::none()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, color(SLATE_100)))
        .rounding(16.0)
        .inner_margin(GAP)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(18.0).strong().color(color(SLATE_800)));
                    ui.label(RichText::new(subtitle).size(13.0).color(color(SLATE_400)));
                });
                ui.with_layout(Layout::right_to_left(Align::Center), controls);
            });
            ui.add_space(16.0);
            body(ui)
        })
        .inner
}

fn stat_card(ui: &mut egui::Ui, card: &StatCardView) {
    egui::Frame::none()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, color(SLATE_100)))
        .rounding(16.0)
        .inner_margin(GAP)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&card.title).size(13.0).color(color(SLATE_500)));
                    ui.label(RichText::new(&card.value).size(26.0).strong().color(color(SLATE_800)));
                });
                ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                    let (badge, _) = ui.allocate_exact_size(vec2(44.0, 44.0), Sense::hover());
                    ui.painter().rect_filled(badge, 12.0, color(card.badge_background));
                    ui.painter().text(
                        badge.center(),
                        Align2::CENTER_CENTER,
                        card.icon.glyph(),
                        FontId::proportional(22.0),
                        color(card.badge_foreground),
                    );
                });
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(card.indicator.to_string())
                        .strong()
                        .color(color(card.indicator_color)),
                );
                ui.label(RichText::new(&card.subtext).size(13.0).color(color(SLATE_400)));
            });
        });
}

/// Tooltip panel kept inside `bounds`: the heading, then one colored line each.
/// `dark` is the evolution chart's custom panel; the others use the light default.
fn tooltip_box(painter: &egui::Painter, at: Pos2, bounds: Rect, tip: &TooltipView, dark: bool) {
    let (fill, border, heading) = if dark {
        (color(SLATE_800), color(SLATE_700), Color32::WHITE)
    } else {
        (Color32::WHITE, color(SLATE_200), color(SLATE_800))
    };
    let font = FontId::proportional(13.0);
    let label_w = painter
        .layout_no_wrap(tip.label.clone(), font.clone(), heading)
        .size()
        .x;
    let width = tip
        .lines
        .iter()
        .map(|l| {
            painter
                .layout_no_wrap(l.text.clone(), font.clone(), color(l.color))
                .size()
                .x
        })
        .fold(label_w, f32::max)
        + 24.0;
    let rows = tip.lines.len() + usize::from(!tip.label.is_empty());
    let height = 24.0 + 18.0 * rows as f32;

    let mut min = at + vec2(12.0, -height - 12.0);
    if min.x + width > bounds.right() {
        min.x = at.x - 12.0 - width;
    }
    if min.y < bounds.top() {
        min.y = at.y + 12.0;
    }
    let rect = Rect::from_min_size(min, vec2(width, height));
    painter.rect_filled(rect, 8.0, fill);
    painter.rect_stroke(rect, 8.0, Stroke::new(1.0, border));

    let x = rect.left() + 12.0;
    let mut y = rect.top() + 12.0;
    if !tip.label.is_empty() {
        painter.text(pos2(x, y), Align2::LEFT_TOP, &tip.label, font.clone(), heading);
        y += 18.0;
    }
    for line in &tip.lines {
        painter.text(pos2(x, y), Align2::LEFT_TOP, &line.text, font.clone(), color(line.color));
        y += 18.0;
    }
}

fn evolution_chart(ui: &mut egui::Ui, view: &AreaChartView, locale: &Locale) {
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), EVOLUTION_HEIGHT), Sense::hover());
    let n = view.points.len();
    if n == 0 {
        return;
    }
    let rect = response.rect;
    let plot = Rect::from_min_max(
        pos2(rect.left() + 44.0, rect.top() + 10.0),
        pos2(rect.right() - 30.0, rect.bottom() - 28.0),
    );
    let x_max = (n.max(2) - 1) as f64;
    let y_max = nice_ceiling(view.max_value());
    let to_screen = |x: f64, y: f64| {
        pos2(
            plot.left() + (x / x_max) as f32 * plot.width(),
            plot.bottom() - (y / y_max) as f32 * plot.height(),
        )
    };

    for k in 0..=Y_TICKS {
        let v = y_max * k as f64 / Y_TICKS as f64;
        let y = to_screen(0.0, v).y;
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            Stroke::new(1.0, color(SLATE_200)),
        );
        painter.text(
            pos2(plot.left() - 8.0, y),
            Align2::RIGHT_CENTER,
            format_tick(v),
            FontId::proportional(12.0),
            color(SLATE_500),
        );
    }
    for (i, p) in view.points.iter().enumerate() {
        painter.text(
            pos2(to_screen(i as f64, 0.0).x, plot.bottom() + 8.0),
            Align2::CENTER_TOP,
            p.label,
            FontId::proportional(12.0),
            color(SLATE_500),
        );
    }

    if let Some(start) = view.projection_start() {
        let x0 = if start == 0 { 0.0 } else { start as f64 - 0.5 };
        let band = Rect::from_min_max(pos2(to_screen(x0, 0.0).x, plot.top()), plot.right_bottom());
        painter.rect_filled(band, 0.0, faded(SLATE_100, 0.6));
        painter.text(
            band.left_top() + vec2(6.0, 10.0),
            Align2::LEFT_CENTER,
            PROJECTION_LABEL,
            FontId::proportional(11.0),
            color(SLATE_400),
        );
    }

    let samples: Vec<(f64, f64)> = view
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let curve = monotone_x(&samples, 12);

    // Fade: every column is cut at the same stop heights, so opacity depends on y alone.
    let top = view.max_value();
    let mut mesh = Mesh::default();
    for w in curve.windows(2) {
        let base = mesh.vertices.len() as u32;
        for &(x, y) in w {
            for (h, alpha) in fade_stops(y, top) {
                mesh.colored_vertex(to_screen(x, h), faded(view.accent, alpha));
            }
        }
        // Left edge is base..base+4, right edge base+4..base+8.
        for k in 0..3 {
            let (l0, l1) = (base + k, base + k + 1);
            let (r0, r1) = (base + 4 + k, base + 5 + k);
            mesh.add_triangle(l0, r0, l1);
            mesh.add_triangle(r0, r1, l1);
        }
    }
    painter.add(Shape::mesh(mesh));
    painter.add(Shape::line(
        curve.iter().map(|&(x, y)| to_screen(x, y)).collect(),
        Stroke::new(3.0, color(view.accent)),
    ));

    if let Some(pos) = response.hover_pos()
        && plot.contains(pos)
    {
        let i = (((pos.x - plot.left()) / plot.width()) as f64 * x_max).round() as usize;
        let i = i.min(n - 1);
        let at = to_screen(i as f64, view.points[i].value);
        painter.line_segment(
            [pos2(at.x, plot.top()), pos2(at.x, plot.bottom())],
            Stroke::new(1.0, color(SLATE_400)),
        );
        painter.circle_filled(at, 5.0, color(view.accent));
        if let Some(tip) = view.tooltip(Some(i), locale) {
            tooltip_box(&painter, at, rect, &tip, true);
        }
    }
}

fn donut_chart(ui: &mut egui::Ui, view: &DonutView) {
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), DONUT_HEIGHT), Sense::hover());
    let rect = response.rect;
    let outer = ((rect.width().min(rect.height()) / 2.0 - 8.0) as f64)
        .clamp(20.0, OUTER_RADIUS * 2.0);
    let inner = outer * INNER_RADIUS / OUTER_RADIUS;
    let center = (rect.center().x as f64, rect.center().y as f64);

    let hovered = response.hover_pos().and_then(|p| {
        hit(
            &view.wedges,
            p.x as f64 - center.0,
            p.y as f64 - center.1,
            inner,
            outer,
        )
    });

    for (i, wedge) in view.wedges.iter().enumerate() {
        let grow = if hovered == Some(i) { 4.0 } else { 0.0 };
        let outline = ring_sector(center, inner, outer + grow, wedge.start_deg, wedge.end_deg);
        // Outer arc forward, inner arc back: pair them up into a triangle strip.
        let half = outline.len() / 2;
        let fill = color(wedge.color);
        let mut mesh = Mesh::default();
        for &(x, y) in &outline {
            mesh.colored_vertex(pos2(x as f32, y as f32), fill);
        }
        for k in 0..half.saturating_sub(1) {
            let (o0, o1) = (k as u32, k as u32 + 1);
            let (i0, i1) = ((outline.len() - 1 - k) as u32, (outline.len() - 2 - k) as u32);
            mesh.add_triangle(o0, o1, i0);
            mesh.add_triangle(o1, i1, i0);
        }
        painter.add(Shape::mesh(mesh));
    }

    if let Some(top) = view.wedges.iter().max_by_key(|w| w.value) {
        let c = rect.center();
        painter.text(
            c - vec2(0.0, 8.0),
            Align2::CENTER_CENTER,
            format!("{:.0}%", top.percent),
            FontId::proportional(18.0),
            color(SLATE_800),
        );
        painter.text(
            c + vec2(0.0, 12.0),
            Align2::CENTER_CENTER,
            top.name,
            FontId::proportional(12.0),
            color(top.color),
        );
    }

    if let (Some(i), Some(pos)) = (hovered, response.hover_pos())
        && let Some(tip) = view.tooltip(i)
    {
        tooltip_box(&painter, pos, rect, &tip, false);
    }

    ui.horizontal_wrapped(|ui| {
        for (name, c) in view.legend() {
            let (dot, _) = ui.allocate_exact_size(vec2(8.0, 8.0), Sense::hover());
            ui.painter().circle_filled(dot.center(), 4.0, color(c));
            ui.label(RichText::new(name).size(12.0).color(color(SLATE_500)));
            ui.add_space(6.0);
        }
    });
}

fn ranking(ui: &mut egui::Ui, view: &DashboardView) {
    match &view.countries {
        CountryChart::Bars(rows) => bars(ui, rows),
        CountryChart::Empty(message) => {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(RichText::new(*message).size(14.0).color(color(SLATE_400)));
                ui.add_space(60.0);
            });
        }
    }
}

fn bars(ui: &mut egui::Ui, rows: &[BarRow]) {
    let height = BAR_BAND * rows.len() as f32;
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), height), Sense::hover());
    let rect = response.rect;
    let plot_x0 = rect.left() + NAME_COLUMN as f32 + 8.0;
    let plot_w = (rect.right() - plot_x0 - 48.0).max(10.0);

    let hovered = response
        .hover_pos()
        .and_then(|p| row_at(rows.len(), height as i32, (p.y - rect.top()) as i32));

    for (i, row) in rows.iter().enumerate() {
        let top = rect.top() + i as f32 * BAR_BAND;
        let cy = top + BAR_BAND / 2.0;
        if hovered == Some(i) {
            painter.rect_filled(
                Rect::from_min_max(pos2(plot_x0, top), pos2(rect.right(), top + BAR_BAND)),
                0.0,
                color(SLATE_50),
            );
        }
        painter.text(
            pos2(rect.left() + NAME_COLUMN as f32, cy),
            Align2::RIGHT_CENTER,
            row.name,
            FontId::proportional(13.0),
            color(SLATE_600),
        );
        let len = (row.fraction as f32 * plot_w).max(1.0);
        painter.rect_filled(
            Rect::from_min_max(
                pos2(plot_x0, cy - BAR_SIZE / 2.0),
                pos2(plot_x0 + len, cy + BAR_SIZE / 2.0),
            ),
            Rounding {
                nw: 0.0,
                ne: 4.0,
                sw: 0.0,
                se: 4.0,
            },
            color(row.color),
        );
        painter.text(
            pos2(plot_x0 + len + 6.0, cy),
            Align2::LEFT_CENTER,
            row.population.to_string(),
            FontId::proportional(11.0),
            color(SLATE_500),
        );
    }

    if let (Some(i), Some(pos)) = (hovered, response.hover_pos()) {
        tooltip_box(&painter, pos, rect, &rows[i].tooltip(), false);
    }
}
