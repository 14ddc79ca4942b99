use std::process::ExitCode;

use log::{error, info};
use rasterkit::display::{Display, InputEvent, RenderTarget, DEFAULT_SCALE};
use rasterkit::{Orientation, PixelType, Pixmap, Scene, Symmetry};
use sdl2::keyboard::Keycode;

struct Args {
    scene: Option<String>,
    save: Option<String>,
    scale: u32,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        scene: None,
        save: None,
        scale: DEFAULT_SCALE,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" | "-s" => {
                if i + 1 < args.len() {
                    parsed.scene = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--save" => {
                if i + 1 < args.len() {
                    parsed.save = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--scale" | "-x" => {
                if i + 1 < args.len() {
                    if let Ok(s) = args[i + 1].parse::<u32>() {
                        parsed.scale = s.max(1);
                    }
                    i += 1;
                }
            },
            "--help" | "-h" => {
                println!("Usage: rasterkit-view [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --scene FILE, -s FILE  Scene to show (default: built-in demo)");
                println!("  --save FILE            Write the scene as JSON and exit");
                println!(
                    "  --scale N, -x N        Window pixels per pixmap pixel (default: {})",
                    DEFAULT_SCALE
                );
                println!("  --help, -h             Show this help message");
                println!();
                println!("Keys:");
                println!("  R       - Rotate the pixmap by 90 degrees");
                println!("  M       - Mirror the pixmap");
                println!("  Space   - Reset the orientation");
                println!("  Escape  - Quit");
                std::process::exit(0);
            },
            other => eprintln!("Ignoring unknown argument {:?}", other),
        }
        i += 1;
    }

    parsed
}

/// Draw the scene in user space, then copy the stored buffer as is so the
/// orientation shows on screen
fn render_frame(scene: &Scene, canvas: &mut Pixmap, frame: &mut Pixmap) -> rasterkit::Result<()> {
    scene.draw(canvas);
    frame.blit_xywh_raw(&*canvas, 0, 0, canvas.raw_w(), canvas.raw_h(), 0, 0)
}

fn run(args: Args) -> Result<(), String> {
    let scene = match &args.scene {
        Some(path) => Scene::load(path).map_err(|e| e.to_string())?,
        None => Scene::demo(),
    };

    if let Some(path) = &args.save {
        scene.save(path).map_err(|e| e.to_string())?;
        info!("Saved scene {:?} to {}", scene.name, path);
        return Ok(());
    }

    let mut canvas = scene.render().map_err(|e| e.to_string())?;
    let mut frame =
        Pixmap::alloc(scene.width, scene.height, PixelType::Rgb888).map_err(|e| e.to_string())?;
    render_frame(&scene, &mut canvas, &mut frame).map_err(|e| e.to_string())?;

    let title = format!("rasterkit - {}", scene.name);
    let (mut display, texture_creator) =
        Display::new(&title, scene.width, scene.height, args.scale)?;
    let mut target = RenderTarget::with_size(&texture_creator, display.width(), display.height())?;

    info!("Showing {}", canvas);

    'main: loop {
        let mut dirty = false;

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::R) => {
                    canvas.rotate(Symmetry::Rotate90);
                    dirty = true;
                },
                InputEvent::KeyDown(Keycode::M) => {
                    canvas.rotate(Symmetry::MirrorV);
                    dirty = true;
                },
                InputEvent::KeyDown(Keycode::Space) => {
                    canvas.set_orientation(Orientation::empty());
                    dirty = true;
                },
                _ => {},
            }
        }

        if dirty {
            info!("Orientation {:?}, user size {}x{}", canvas.orientation(), canvas.w(), canvas.h());
            render_frame(&scene, &mut canvas, &mut frame).map_err(|e| e.to_string())?;
        }

        display.present(&mut target, &frame)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
