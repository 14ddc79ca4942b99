//! Polygon outline and scanline fill.
//!
//! The fill keeps an edge list with horizontal edges removed (they are drawn
//! as hlines on their own). Each edge, except those ending on the bottom
//! most row, is shortened by one row so that a vertex shared by two edges is
//! counted once. On every row an edge contributes the span it covers between
//! `y - 0.49` and `y + 0.49`, spans are sorted and joined in pairs.

use crate::pixel::Pixel;
use crate::pixmap::Pixmap;

#[derive(Debug, Clone, Copy)]
struct Edge {
    x1: i64,
    y1: i64,
    y2: i64,
    dx: i64,
    dy: i64,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    lx: i64,
    rx: i64,
}

impl Edge {
    /// Span covered on row `y`, `None` when the edge does not reach it
    fn span(&self, y: i64) -> Option<Span> {
        if y < self.y1 || y > self.y2 {
            return None;
        }

        // Multiply before dividing
        let ry = (y - self.y1) as f64;
        let (dx, dy) = (self.dx as f64, self.dy as f64);
        let a = (self.x1 as f64 + dx * (ry - 0.49) / dy + 0.5) as i64;
        let b = (self.x1 as f64 + dx * (ry + 0.49) / dy + 0.5) as i64;

        Some(Span {
            lx: a.min(b),
            rx: a.max(b),
        })
    }
}

fn edges(points: &[(i64, i64)], ymax: i64) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(points.len());
    let (mut lx, mut ly) = points[points.len() - 1];

    for &(cx, cy) in points {
        if cy != ly {
            let (x1, y1, x2, y2) = if cy > ly {
                (lx, ly, cx, cy)
            } else {
                (cx, cy, lx, ly)
            };
            edges.push(Edge {
                x1,
                y1,
                y2: if y2 == ymax { y2 } else { y2 - 1 },
                dx: x2 - x1,
                dy: y2 - y1,
            });
        }
        lx = cx;
        ly = cy;
    }

    edges
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    // ========================================================================
    // Raw workers
    // ========================================================================

    pub(crate) fn draw_polygon(&mut self, points: &[(i64, i64)], pixel: Pixel) {
        let Some(&(mut px, mut py)) = points.last() else {
            return;
        };
        for &(x, y) in points {
            self.draw_line(px, py, x, y, pixel);
            px = x;
            py = y;
        }
    }

    pub(crate) fn draw_fill_polygon(&mut self, points: &[(i64, i64)], pixel: Pixel) {
        match points {
            [] => return,
            [(x, y)] => {
                self.put_pixel_raw_clipped(*x, *y, pixel);
                return;
            },
            [(x0, y0), (x1, y1)] => {
                self.draw_line(*x0, *y0, *x1, *y1, pixel);
                return;
            },
            _ => {},
        }

        // Horizontal edges never produce intersections
        let (mut lx, mut ly) = points[points.len() - 1];
        for &(cx, cy) in points {
            if cy == ly {
                self.draw_hline(cx, lx, cy, pixel);
            }
            lx = cx;
            ly = cy;
        }

        let ymin = points.iter().map(|p| p.1).min().unwrap_or(0);
        let ymax = points.iter().map(|p| p.1).max().unwrap_or(0);
        let edges = edges(points, ymax);

        let first = ymin.max(0);
        let last = ymax.min(self.raw_h() as i64 - 1);

        // Reused for every row
        let mut spans: Vec<Span> = Vec::with_capacity(edges.len());

        for y in first..=last {
            spans.clear();
            spans.extend(edges.iter().filter_map(|e| e.span(y)));
            spans.sort_by_key(|s| s.lx);

            for pair in spans.chunks_exact(2) {
                self.draw_hline(pair[0].lx, pair[1].rx, y, pixel);
            }
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    fn raw_points(&self, points: &[(i32, i32)]) -> Vec<(i64, i64)> {
        points
            .iter()
            .map(|&(x, y)| self.raw_point(x as i64, y as i64))
            .collect()
    }

    /// Closed outline through `points`
    pub fn polygon(&mut self, points: &[(i32, i32)], pixel: Pixel) {
        let points = self.raw_points(points);
        self.draw_polygon(&points, pixel);
    }

    pub fn polygon_raw(&mut self, points: &[(i32, i32)], pixel: Pixel) {
        let points: Vec<_> = points.iter().map(|&(x, y)| (x as i64, y as i64)).collect();
        self.draw_polygon(&points, pixel);
    }

    /// Filled polygon, one vertex is a pixel and two are a line
    pub fn fill_polygon(&mut self, points: &[(i32, i32)], pixel: Pixel) {
        let points = self.raw_points(points);
        self.draw_fill_polygon(&points, pixel);
    }

    pub fn fill_polygon_raw(&mut self, points: &[(i32, i32)], pixel: Pixel) {
        let points: Vec<_> = points.iter().map(|&(x, y)| (x as i64, y as i64)).collect();
        self.draw_fill_polygon(&points, pixel);
    }
}
