//! SDL2 window showing a pixmap.
//!
//! Frames are uploaded as 24 bit pixels into a streaming texture and scaled
//! to the window. `Rgb888` pixmaps keep blue in the lowest byte, which is
//! SDL's `BGR24` layout.

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::pixel::PixelType;
use crate::pixmap::Pixmap;

pub const DEFAULT_SCALE: u32 = 2;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

impl Display {
    /// Window of `width` x `height` pixmap pixels, each shown as a
    /// `scale` x `scale` block
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let scale = scale.max(1);
        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;
        debug!("Opened {}x{} window at scale {}", width, height, scale);

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload an `Rgb888` frame and show it
    pub fn present(&mut self, target: &mut RenderTarget, frame: &Pixmap) -> Result<(), String> {
        if frame.pixel_type() != PixelType::Rgb888 {
            return Err(format!("cannot present {} frame", frame.pixel_type()));
        }
        if (frame.raw_w(), frame.raw_h()) != (target.width, target.height) {
            return Err(format!(
                "frame {}x{} does not match {}x{} target",
                frame.raw_w(),
                frame.raw_h(),
                target.width,
                target.height
            ));
        }

        target
            .texture
            .update(None, frame.data(), frame.bytes_per_row())
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::BGR24, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}
