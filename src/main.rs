// src/main.rs
//
// Demo window: a procedurally painted panel that shatters on key press.
//
// Space        random direction
// Arrow keys   up / down / left / right
// 1-4          upper-left / upper-right / lower-left / lower-right
// J            log the next plan as JSON

mod playback;

use log::{info, warn};
use nannou::image::{imageops, DynamicImage, Rgba, RgbaImage};
use nannou::prelude::*;
use rand::rngs::StdRng;

use shatter::{
    config::Config,
    services,
    utilities::logging::init_logging,
    Completion, Direction, DisintegrationRequest, Disintegrator, Particle, PipelineEvent, Rect,
    Surface,
};

struct Model {
    disintegrator: Disintegrator<Panel>,
    config: Config,
    // only used for plans logged with J; requests use the disintegrator's rng
    plan_rng: StdRng,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(config.logging.to_logging_config());
    if let Some(err) = load_error {
        warn!("{}; using default configuration", err);
    }

    app.new_window()
        .title("shatter 0.1.0")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("Failed to create window");

    let panel = Panel::new(app, &config);
    let disintegrator = Disintegrator::from_config(panel, &config);

    Model {
        disintegrator,
        plan_rng: config.rng(),
        config,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let direction = match key {
        Key::Space => model.config.disintegration.direction,
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        Key::Key1 => Some(Direction::UpperLeft),
        Key::Key2 => Some(Direction::UpperRight),
        Key::Key3 => Some(Direction::LowerLeft),
        Key::Key4 => Some(Direction::LowerRight),
        Key::J => {
            log_plan(model);
            return;
        }
        _ => return,
    };

    let mut request = DisintegrationRequest::new()
        .estimated_triangle_count(model.config.disintegration.estimated_triangle_count)
        .on_complete(|| info!("panel restored"));
    request.direction = direction;

    let id = model.disintegrator.disintegrate(request);
    info!("requested disintegration {}", id);
}

fn log_plan(model: &mut Model) {
    let direction = model
        .config
        .disintegration
        .direction
        .unwrap_or_else(|| Direction::random(&mut model.plan_rng));
    let plan = services::plan(
        &model.config.triangulator(),
        model.disintegrator.surface().bounds(),
        model.config.disintegration.estimated_triangle_count,
        direction,
        &model.config.animation,
        &mut model.plan_rng,
    );
    match plan.to_json() {
        Ok(json) => info!("plan with {} pieces:\n{}", plan.pieces.len(), json),
        Err(err) => warn!("could not serialize plan: {}", err),
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let dt = update.since_last.as_secs_f32();
    model.disintegrator.surface_mut().advance(dt);

    for event in model.disintegrator.poll() {
        match event {
            PipelineEvent::Aborted { request, error } => {
                warn!("disintegration {} aborted: {}", request, error)
            }
            event => info!("{:?}", event),
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let panel = model.disintegrator.surface();
    let bounds = panel.bounds;

    if panel.visible {
        draw.texture(&panel.texture).w_h(bounds.width, bounds.height);
    }

    for particle in &panel.particles {
        let pose = playback::pose_at(&particle.animation, panel.elapsed);
        if pose.opacity <= 0.0 {
            continue;
        }
        let [a, b, c] = playback::vertices_at(particle, &pose);
        let [r, g, bl, alpha] = particle.content;
        draw.tri()
            .points(to_window(a, &bounds), to_window(b, &bounds), to_window(c, &bounds))
            .color(srgba(r, g, bl, alpha * pose.opacity));
    }

    draw.to_frame(app, &frame).unwrap();
}

// Surface coordinates are top-left origin, y down; nannou is centered, y up.
fn to_window(p: Point2, bounds: &Rect) -> Point2 {
    pt2(p.x - bounds.width / 2.0, bounds.height / 2.0 - p.y)
}

// ******************************* Panel surface *****************************

struct Panel {
    bounds: Rect,
    scale_factor: f32,
    image: RgbaImage,
    texture: wgpu::Texture,
    visible: bool,

    particles: Vec<Particle<[f32; 4]>>,
    elapsed: f32,
    finish_after: f32,
    on_finished: Option<Completion>,
}

impl Panel {
    fn new(app: &App, config: &Config) -> Self {
        let bounds = Rect::from_size(config.window.width as f32, config.window.height as f32);
        let scale_factor = config.surface.scale_factor.max(0.1);
        let image = paint(&bounds, scale_factor, config.surface.tile_size);
        let texture = wgpu::Texture::from_image(app, &DynamicImage::ImageRgba8(image.clone()));

        Self {
            bounds,
            scale_factor,
            image,
            texture,
            visible: true,
            particles: Vec::new(),
            elapsed: 0.0,
            finish_after: 0.0,
            on_finished: None,
        }
    }

    fn advance(&mut self, dt: f32) {
        if self.on_finished.is_none() {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.finish_after {
            self.particles.clear();
            self.visible = true;
            if let Some(on_finished) = self.on_finished.take() {
                on_finished();
            }
        }
    }
}

impl Surface for Panel {
    type Snapshot = RgbaImage;
    type Content = [f32; 4];

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn capture(&mut self) -> Option<RgbaImage> {
        self.visible.then(|| self.image.clone())
    }

    // Flat colour: the average of the pixels under the frame.
    fn crop(&self, snapshot: &RgbaImage, pixel_rect: Rect) -> Option<[f32; 4]> {
        let (width, height) = snapshot.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let x0 = (pixel_rect.min_x().max(0.0) as u32).min(width - 1);
        let y0 = (pixel_rect.min_y().max(0.0) as u32).min(height - 1);
        let x1 = (pixel_rect.max_x().ceil().max(0.0) as u32).clamp(x0 + 1, width);
        let y1 = (pixel_rect.max_y().ceil().max(0.0) as u32).clamp(y0 + 1, height);

        let piece = imageops::crop_imm(snapshot, x0, y0, x1 - x0, y1 - y0).to_image();
        let mut sum = [0.0f32; 4];
        for pixel in piece.pixels() {
            for (total, channel) in sum.iter_mut().zip(pixel.0) {
                *total += channel as f32 / 255.0;
            }
        }
        let count = (piece.width() * piece.height()) as f32;
        Some(sum.map(|total| total / count))
    }

    fn hide_content(&mut self) {
        self.visible = false;
    }

    fn present(&mut self, particles: Vec<Particle<[f32; 4]>>, finish_after: f32, on_finished: Completion) {
        self.particles = particles;
        self.elapsed = 0.0;
        self.finish_after = finish_after;
        self.on_finished = Some(on_finished);
    }
}

// Checker tiles over a diagonal gradient, at device resolution.
fn paint(bounds: &Rect, scale_factor: f32, tile_size: f32) -> RgbaImage {
    let width = (bounds.width * scale_factor).round().max(1.0) as u32;
    let height = (bounds.height * scale_factor).round().max(1.0) as u32;
    let tile = (tile_size * scale_factor).max(1.0);

    RgbaImage::from_fn(width, height, |x, y| {
        let u = x as f32 / width as f32;
        let v = y as f32 / height as f32;
        let checker = ((x as f32 / tile) as u32 + (y as f32 / tile) as u32) % 2 == 0;
        let shade = if checker { 1.0 } else { 0.75 };
        Rgba([
            (255.0 * shade * (0.3 + 0.7 * u)) as u8,
            (255.0 * shade * (0.2 + 0.5 * v)) as u8,
            (255.0 * shade * (0.9 - 0.6 * u)) as u8,
            255,
        ])
    })
}
