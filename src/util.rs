// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Utilities: canvas points, inclusive ui rects and path helpers.

use serde::{Deserialize, Serialize};
use std::{
    cmp::{max, min},
    env,
    fs::read_dir,
    io::{self, ErrorKind},
    ops::{Add, Sub},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

/// Walks up from the current directory looking for `flag_file`.
pub fn get_project_root(flag_file: &str) -> io::Result<PathBuf> {
    let path = env::current_dir()?;
    for p in path.as_path().ancestors() {
        let mut entries = read_dir(p)?;
        if entries.any(|e| e.map(|e| e.file_name() == *flag_file).unwrap_or(false)) {
            return Ok(PathBuf::from(p));
        }
    }
    Err(io::Error::new(
        ErrorKind::NotFound,
        "Ran out of places to find flag_file",
    ))
}

/// Root of the crate at runtime, i.e. where Cargo.toml locates.
/// Falls back to "." when nothing is found.
pub fn get_root_path() -> String {
    match get_project_root("Cargo.toml") {
        Ok(p) => p.to_string_lossy().into_owned(),
        Err(_e) => ".".to_string(),
    }
}

pub fn get_abs_path(fpath: &str) -> String {
    if Path::new(fpath).is_relative() {
        format!("{}{}{}", get_root_path(), MAIN_SEPARATOR, fpath)
    } else {
        fpath.to_string()
    }
}

/// A position on the canvas. Canvas coordinates are zoom independent.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rect in canvas units. `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl UiRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        UiRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rect from two inclusive corners given in any order.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (l, r) = (min(left, right), max(left, right));
        let (t, b) = (min(top, bottom), max(top, bottom));
        UiRect::new(l, t, r - l + 1, b - t + 1)
    }

    pub fn left(self) -> i32 {
        self.x
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn top(self) -> i32 {
        self.y
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    pub fn intersects(self, other: UiRect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn intersection(self, other: UiRect) -> UiRect {
        let x1 = max(self.x, other.x);
        let y1 = max(self.y, other.y);
        let x2 = min(self.right(), other.right());
        let y2 = min(self.bottom(), other.bottom());
        UiRect::new(x1, y1, max(0, x2 - x1), max(0, y2 - y1))
    }
}
