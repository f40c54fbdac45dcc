//! Drawing surfaces.
//!
//! A [`Surface`] is the only thing a sequence draws into. It needs exactly
//! two primitives, clearing a rectangle and blitting an image scaled into a
//! rectangle. [`RgbaSurface`] implements both on top of an in-memory
//! [`RgbaImage`].

use std::{collections::HashMap, path::Path};

use image::{
	Rgba, RgbaImage,
	imageops::{self, FilterType},
};
use reel_types::ReelError;

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
	/// Left edge
	pub x: i64,
	/// Top edge
	pub y: i64,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
}

impl Rect {
	/// Creates a rectangle.
	pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Rectangle anchored at the origin.
	pub fn from_size(width: u32, height: u32) -> Self {
		Self::new(0, 0, width, height)
	}

	/// Returns true if the rectangle covers no pixels.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Part of the rectangle that lies inside a `width` x `height` area.
	pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
		let left = self.x.max(0);
		let top = self.y.max(0);
		let right = (self.x + i64::from(self.width)).min(i64::from(width));
		let bottom = (self.y + i64::from(self.height)).min(i64::from(height));
		if right <= left || bottom <= top {
			return None;
		}
		Some(Self::new(left, top, (right - left) as u32, (bottom - top) as u32))
	}
}

/// 2D raster target a sequence renders into.
pub trait Surface {
	/// Image type accepted by [`draw_image`](Self::draw_image)
	type Image;

	/// Current width in pixels.
	fn width(&self) -> u32;

	/// Current height in pixels.
	fn height(&self) -> u32;

	/// The whole surface as a rectangle.
	fn bounds(&self) -> Rect {
		Rect::from_size(self.width(), self.height())
	}

	/// Resets every pixel inside `rect` to transparent.
	fn clear_rect(&mut self, rect: Rect);

	/// Draws `image` scaled to fill `rect`.
	fn draw_image(&mut self, image: &Self::Image, rect: Rect);
}

/// Surface backed by an RGBA8 image buffer.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use reel_player::{RgbaSurface, Surface};
///
/// let mut surface = RgbaSurface::new(4, 4);
/// let frame = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
/// surface.draw_image(&frame, surface.bounds());
///
/// assert_eq!(surface.pixels().get_pixel(3, 3), &Rgba([255, 0, 0, 255]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaSurface {
	canvas: RgbaImage,
}

impl RgbaSurface {
	/// Creates a transparent surface.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			canvas: RgbaImage::new(width, height),
		}
	}

	/// Wraps an existing image buffer.
	pub fn from_image(canvas: RgbaImage) -> Self {
		Self {
			canvas,
		}
	}

	/// Current contents.
	pub fn pixels(&self) -> &RgbaImage {
		&self.canvas
	}

	/// Consumes the surface, returning its contents.
	pub fn into_image(self) -> RgbaImage {
		self.canvas
	}

	/// Writes the surface to an image file, format chosen by extension.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReelError> {
		let path = path.as_ref();
		self.canvas.save(path).map_err(|e| std::io::Error::other(format!("{}: {}", path.display(), e)))?;
		log::debug!("Saved {}x{} surface to {}", self.width(), self.height(), path.display());
		Ok(())
	}
}

impl Surface for RgbaSurface {
	type Image = RgbaImage;

	fn width(&self) -> u32 {
		self.canvas.width()
	}

	fn height(&self) -> u32 {
		self.canvas.height()
	}

	fn clear_rect(&mut self, rect: Rect) {
		let Some(area) = rect.clip(self.width(), self.height()) else {
			return;
		};
		let (x0, y0) = (area.x as u32, area.y as u32);
		for y in y0..y0 + area.height {
			for x in x0..x0 + area.width {
				self.canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
			}
		}
	}

	fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
		if rect.is_empty() {
			return;
		}
		if image.dimensions() == (rect.width, rect.height) {
			imageops::overlay(&mut self.canvas, image, rect.x, rect.y);
		} else {
			let scaled = imageops::resize(image, rect.width, rect.height, FilterType::Triangle);
			imageops::overlay(&mut self.canvas, &scaled, rect.x, rect.y);
		}
	}
}

/// Lookup of drawing surfaces by identifier.
pub trait SurfaceProvider {
	/// Surface type handed out
	type Surface: Surface;

	/// Removes and returns the surface registered as `id`.
	fn take_surface(&mut self, id: &str) -> Option<Self::Surface>;
}

/// Map of named surfaces.
#[derive(Debug, Clone)]
pub struct SurfaceRegistry<S> {
	surfaces: HashMap<String, S>,
}

impl<S> SurfaceRegistry<S> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			surfaces: HashMap::new(),
		}
	}

	/// Registers `surface` under `id`, returning any surface it replaced.
	pub fn insert(&mut self, id: impl Into<String>, surface: S) -> Option<S> {
		self.surfaces.insert(id.into(), surface)
	}

	/// Returns true if `id` is registered.
	pub fn contains(&self, id: &str) -> bool {
		self.surfaces.contains_key(id)
	}

	/// Number of registered surfaces.
	pub fn len(&self) -> usize {
		self.surfaces.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.surfaces.is_empty()
	}
}

impl<S> Default for SurfaceRegistry<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Surface> SurfaceProvider for SurfaceRegistry<S> {
	type Surface = S;

	fn take_surface(&mut self, id: &str) -> Option<S> {
		self.surfaces.remove(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
	const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

	#[test]
	fn test_rect_clip() {
		assert_eq!(Rect::new(-2, 1, 4, 10).clip(8, 4), Some(Rect::new(0, 1, 2, 3)));
		assert_eq!(Rect::new(9, 0, 4, 4).clip(8, 4), None);
		assert!(Rect::from_size(0, 5).is_empty());
	}

	#[test]
	fn test_clear_rect_writes_transparent() {
		let mut surface = RgbaSurface::from_image(RgbaImage::from_pixel(4, 4, RED));
		surface.clear_rect(Rect::new(1, 1, 2, 2));

		assert_eq!(surface.pixels().get_pixel(0, 0), &RED);
		assert_eq!(surface.pixels().get_pixel(1, 1), &CLEAR);
		assert_eq!(surface.pixels().get_pixel(2, 2), &CLEAR);
		assert_eq!(surface.pixels().get_pixel(3, 3), &RED);
	}

	#[test]
	fn test_draw_scales_to_target() {
		let mut surface = RgbaSurface::new(6, 4);
		let frame = RgbaImage::from_pixel(3, 2, RED);
		surface.draw_image(&frame, surface.bounds());

		assert!(surface.pixels().pixels().all(|pixel| *pixel == RED));
	}

	#[test]
	fn test_draw_same_size_copies_pixels() {
		let mut frame = RgbaImage::from_pixel(2, 2, RED);
		frame.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
		let mut surface = RgbaSurface::new(2, 2);
		surface.draw_image(&frame, surface.bounds());

		assert_eq!(surface.pixels(), &frame);
	}

	#[test]
	fn test_registry_hands_over_ownership() {
		let mut registry = SurfaceRegistry::new();
		registry.insert("hero", RgbaSurface::new(1, 1));
		assert!(registry.contains("hero"));

		assert!(registry.take_surface("hero").is_some());
		assert!(registry.take_surface("hero").is_none());
		assert!(registry.is_empty());
	}
}
