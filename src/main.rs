// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod blob;
mod camera;
mod config;
mod display;
mod math3d;
mod particles;
mod render;
mod scheduler;
mod simplex;
mod util;

use camera::PointerSample;
use config::HeroConfig;
use display::{Display, InputEvent, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use scheduler::Backdrop;
use sdl2::keyboard::Keycode;
use util::FpsCounter;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_CONFIG: &str = "hero.json";

struct Options {
    width: u32,
    height: u32,
    vsync: bool,
    seed: u64,
    config_path: String,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        seed: DEFAULT_SEED,
        config_path: DEFAULT_CONFIG.to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => opts.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        opts.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        opts.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            opts.width = w;
                            opts.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    if let Ok(s) = args[i + 1].parse::<u64>() {
                        opts.seed = s;
                    }
                    i += 1;
                }
            },
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    opts.config_path = args[i + 1].clone();
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: backdrop [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --width W, -w W           Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H          Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --seed N, -s N            Noise/particle seed (default: {})", DEFAULT_SEED);
                println!("  --config PATH, -c PATH    Hero text JSON (default: {})", DEFAULT_CONFIG);
                println!("  --no-vsync                Disable VSync for uncapped framerate");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    opts
}

fn main() -> Result<(), String> {
    let opts = parse_args();
    let config = HeroConfig::load_or_default(&opts.config_path);

    // No rendering surface available: no-op silently rather than raise.
    let created = Display::create(&config.title, opts.width, opts.height, opts.vsync);
    let (mut display, texture_creator) = match created {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("backdrop: no rendering surface available ({}); nothing to do", e);
            return Ok(());
        },
    };

    let mut target = RenderTarget::with_size(&texture_creator, opts.width, opts.height)?;
    let mut buffer = PixelBuffer::with_size(opts.width, opts.height);
    let mut scene = Backdrop::mount(opts.seed, opts.width, opts.height);

    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;
    let mut frames: u64 = 0;

    println!("=== {} ===", config.title);
    println!("{}", config.subtitle);
    for link in &config.links {
        println!("  {} -> {}", link.label, link.href);
    }
    println!();
    println!("Resolution: {}x{}", opts.width, opts.height);
    println!("Seed: {}", opts.seed);
    if opts.vsync {
        println!("VSync: ON (locked to display refresh). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Controls:");
    println!("  Mouse      - Steer the camera");
    println!("  F          - Toggle FPS report");
    println!("  Escape     - Quit");

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F) => show_fps = !show_fps,
                InputEvent::KeyDown(_) => {},
                InputEvent::PointerMove { x, y } => {
                    scene.post_pointer(PointerSample::from_viewport(
                        x,
                        y,
                        display.width(),
                        display.height(),
                    ));
                },
                InputEvent::Resized { width, height } => {
                    scene.post_resize(width, height);
                    // A minimized window reports zero area; keep the old
                    // surface until it comes back.
                    if width > 0 && height > 0 {
                        target = RenderTarget::with_size(&texture_creator, width, height)?;
                        buffer = PixelBuffer::with_size(width, height);
                    }
                },
            }
        }

        scene.tick(dt);
        render::draw(&scene, &mut buffer);

        frames += 1;
        if show_fps && frames % 60 == 0 {
            println!(
                "FPS {:.0} avg  {:.1}ms/frame",
                avg_fps,
                fps_counter.avg_frame_time_ms()
            );
        }

        display.present(&mut target, &buffer)?;
    }

    scene.teardown();
    Ok(())
}
