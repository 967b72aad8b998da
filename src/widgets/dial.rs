use crate::*;
use gtk::cairo::{self, Context, FontSlant, FontWeight};
use libs::clock_state::HandAngles;
use libs::config::FaceLayout;
use libs::face::{dial_angle, on_circle, FaceGeometry, TickKind};
use std::f64::consts::TAU;

type Rgb = (f64, f64, f64);

fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

fn source(cr: &Context, (r, g, b): Rgb) {
    cr.set_source_rgb(r, g, b);
}

/// Scales the logical face so it fills the smaller side of the area.
fn fit(cr: &Context, layout: &FaceLayout, width: i32, height: i32) {
    let side = width.min(height) as f64;
    cr.translate((width as f64 - side) / 2.0, (height as f64 - side) / 2.0);
    let scale = side / (2.0 * layout.radius);
    cr.scale(scale, scale);
    cr.translate(layout.radius - layout.center_x, layout.radius - layout.center_y);
}

fn draw_face(
    cr: &Context,
    face: &FaceGeometry,
    layout: &FaceLayout,
    font: &str,
) -> Result<(), cairo::Error> {
    let center = layout.center();
    cr.arc(center.x, center.y, layout.radius, 0.0, TAU);
    source(cr, rgb(30, 30, 30));
    cr.fill()?;

    cr.set_line_cap(cairo::LineCap::Round);
    for segment in face.segments() {
        source(
            cr,
            match segment.kind {
                TickKind::Minute => rgb(100, 100, 100),
                TickKind::Hour => rgb(128, 128, 128),
            },
        );
        cr.set_line_width(segment.width);
        cr.move_to(segment.start.x, segment.start.y);
        cr.line_to(segment.end.x, segment.end.y);
        cr.stroke()?;
    }

    cr.select_font_face(font, FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(layout.numeral_size);
    source(cr, rgb(224, 255, 255));
    for numeral in &face.numerals {
        let extents = cr.text_extents(&numeral.text)?;
        let corner = numeral.top_left(extents.width(), extents.height());
        // show_text starts at the baseline origin, not the ink box
        cr.move_to(corner.x - extents.x_bearing(), corner.y - extents.y_bearing());
        cr.show_text(&numeral.text)?;
    }
    Ok(())
}

fn hand(
    cr: &Context,
    layout: &FaceLayout,
    degrees: f64,
    length: f64,
    width: f64,
    color: Rgb,
) -> Result<(), cairo::Error> {
    let center = layout.center();
    // hand angles count from 12 o'clock, one unit per degree
    let tip = on_circle(center, length, dial_angle(degrees, 1.0));
    source(cr, color);
    cr.set_line_width(width);
    cr.move_to(center.x, center.y);
    cr.line_to(tip.x, tip.y);
    cr.stroke()
}

fn draw_hands(cr: &Context, angles: HandAngles, layout: &FaceLayout) -> Result<(), cairo::Error> {
    cr.set_line_cap(cairo::LineCap::Round);
    hand(cr, layout, angles.hour, layout.hour_hand_length, 6.0, rgb(240, 240, 240))?;
    hand(cr, layout, angles.minute, layout.minute_hand_length, 4.0, rgb(200, 200, 200))?;
    hand(cr, layout, angles.second, layout.second_hand_length, 2.0, rgb(255, 80, 80))?;
    let center = layout.center();
    cr.arc(center.x, center.y, 5.0, 0.0, TAU);
    source(cr, rgb(255, 80, 80));
    cr.fill()
}

#[derive(Clone)]
pub struct Dial {
    widget: Overlay,
    hands: DrawingArea,
    angles: Rc<Cell<HandAngles>>,
}

impl Dial {
    pub fn new(config: &Config) -> Self {
        let layout = Rc::new(config.layout.clone());
        let side = (layout.radius * 2.0).round() as i32;

        let face = DrawingArea::builder()
            .content_width(side)
            .content_height(side)
            .build();
        let geometry: Rc<RefCell<Option<FaceGeometry>>> = Rc::new(RefCell::new(None));
        face.connect_realize(clone!(
            #[strong] geometry,
            #[strong] layout,
            move |_| {
                geometry.replace(Some(FaceGeometry::build(&layout)));
            }
        ));
        face.connect_unrealize(clone!(
            #[strong] geometry,
            move |_| {
                geometry.replace(None);
            }
        ));
        let font = config.numeral_font.clone();
        face.set_draw_func(clone!(
            #[strong] layout,
            move |_, cr, width, height| {
                let mut geometry = geometry.borrow_mut();
                let face = geometry.get_or_insert_with(|| FaceGeometry::build(&layout));
                fit(cr, &layout, width, height);
                if let Err(err) = draw_face(cr, face, &layout, &font) {
                    log::warn!("failed to draw clock face: {err}");
                }
            }
        ));

        let angles = Rc::new(Cell::new(HandAngles::default()));
        let hands = DrawingArea::new();
        hands.set_draw_func(clone!(
            #[strong] angles,
            move |_, cr, width, height| {
                fit(cr, &layout, width, height);
                if let Err(err) = draw_hands(cr, angles.get(), &layout) {
                    log::warn!("failed to draw clock hands: {err}");
                }
            }
        ));

        let widget = Overlay::builder().child(&face).css_classes(["dial"]).build();
        widget.add_overlay(&hands);
        Self {
            widget,
            hands,
            angles,
        }
    }

    pub fn widget(&self) -> Overlay {
        self.widget.clone()
    }

    /// Only the hands layer is redrawn; the face stays cached.
    pub fn set_angles(&self, angles: HandAngles) {
        if self.angles.get() != angles {
            self.angles.set(angles);
            self.hands.queue_draw();
        }
    }
}
