use crate::pixel::Pixel;
use crate::pixmap::Pixmap;

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Triangle outline
    pub fn triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixel: Pixel,
    ) {
        self.polygon(&[(x0, y0), (x1, y1), (x2, y2)], pixel);
    }

    pub fn triangle_raw(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixel: Pixel,
    ) {
        self.polygon_raw(&[(x0, y0), (x1, y1), (x2, y2)], pixel);
    }

    pub fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixel: Pixel,
    ) {
        self.fill_polygon(&[(x0, y0), (x1, y1), (x2, y2)], pixel);
    }

    pub fn fill_triangle_raw(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixel: Pixel,
    ) {
        self.fill_polygon_raw(&[(x0, y0), (x1, y1), (x2, y2)], pixel);
    }
}
