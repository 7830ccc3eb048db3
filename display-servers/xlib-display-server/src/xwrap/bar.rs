//! The bar window, its font and painting.
use super::{to_cstring, Colors, SchemeColors};
use crate::error::{Result, XlibError};
use crate::XWrap;
use ldwm_core::bar::{Bar, Cell, Indicator, Scheme};
use ldwm_core::models::Xyhw;
use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;
use x11_dl::xlib;

/// Font used in the bar, either a font set (multibyte text) or a single core font.
pub struct XFont {
    kind: FontKind,
    pub ascent: i32,
    pub descent: i32,
}

enum FontKind {
    Set(xlib::XFontSet),
    Core(*mut xlib::XFontStruct),
}

impl XFont {
    /// Loads `name` as a font set, falling back to the core font and then to `fixed`.
    // `XCreateFontSet`: https://tronche.com/gui/x/xlib/locales/XCreateFontSet.html
    // `XLoadQueryFont`: https://tronche.com/gui/x/xlib/graphics/font-metrics/XLoadQueryFont.html
    pub fn load(xlib: &xlib::Xlib, display: *mut xlib::Display, name: &str) -> Result<Self> {
        let font_name = to_cstring(name);
        unsafe {
            let mut missing: *mut *mut c_char = ptr::null_mut();
            let mut missing_count: c_int = 0;
            let mut default: *mut c_char = ptr::null_mut();
            let set = (xlib.XCreateFontSet)(
                display,
                font_name.as_ptr(),
                &mut missing,
                &mut missing_count,
                &mut default,
            );
            if !missing.is_null() {
                tracing::debug!(missing_count, "font set is missing charsets");
                (xlib.XFreeStringList)(missing);
            }
            if !set.is_null() {
                let mut fonts: *mut *mut xlib::XFontStruct = ptr::null_mut();
                let mut names: *mut *mut c_char = ptr::null_mut();
                let count = (xlib.XFontsOfFontSet)(set, &mut fonts, &mut names);
                let fonts = std::slice::from_raw_parts(fonts, count.max(0) as usize);
                let (ascent, descent) = fonts.iter().fold((0, 0), |(a, d), &font| {
                    ((*font).ascent.max(a), (*font).descent.max(d))
                });
                return Ok(Self {
                    kind: FontKind::Set(set),
                    ascent,
                    descent,
                });
            }

            let mut core = (xlib.XLoadQueryFont)(display, font_name.as_ptr());
            if core.is_null() {
                tracing::warn!(font = name, "cannot load font, using 'fixed'");
                core = (xlib.XLoadQueryFont)(display, b"fixed\0".as_ptr().cast());
            }
            if core.is_null() {
                return Err(XlibError::FontUnavailable(name.to_owned()));
            }
            Ok(Self {
                kind: FontKind::Core(core),
                ascent: (*core).ascent,
                descent: (*core).descent,
            })
        }
    }

    pub const fn height(&self) -> i32 {
        self.ascent + self.descent
    }

    /// Rendered width of `text`.
    // `XmbTextExtents`: https://tronche.com/gui/x/xlib/locales/XmbTextExtents.html
    // `XTextWidth`: https://tronche.com/gui/x/xlib/graphics/font-metrics/XTextWidth.html
    pub fn text_width(&self, xlib: &xlib::Xlib, text: &str) -> i32 {
        let len = text.len() as c_int;
        let text = text.as_ptr().cast::<c_char>();
        unsafe {
            match self.kind {
                FontKind::Set(set) => {
                    let mut ink: xlib::XRectangle = std::mem::zeroed();
                    let mut logical: xlib::XRectangle = std::mem::zeroed();
                    (xlib.XmbTextExtents)(set, text, len, &mut ink, &mut logical);
                    i32::from(logical.width)
                }
                FontKind::Core(core) => (xlib.XTextWidth)(core, text, len),
            }
        }
    }

    // `XFreeFontSet`: https://tronche.com/gui/x/xlib/locales/XFreeFontSet.html
    // `XFreeFont`: https://tronche.com/gui/x/xlib/graphics/font-metrics/XFreeFont.html
    pub fn free(&self, xlib: &xlib::Xlib, display: *mut xlib::Display) {
        unsafe {
            match self.kind {
                FontKind::Set(set) => (xlib.XFreeFontSet)(display, set),
                FontKind::Core(core) => {
                    (xlib.XFreeFont)(display, core);
                }
            }
        }
    }
}

/// The bar window and the pixmap it is painted through.
pub struct BarSurface {
    pub window: xlib::Window,
    drawable: xlib::Pixmap,
    gc: xlib::GC,
    depth: c_uint,
    width: i32,
    height: i32,
}

impl BarSurface {
    // `XCreateWindow`: https://tronche.com/gui/x/xlib/window/XCreateWindow.html
    // `XCreatePixmap`: https://tronche.com/gui/x/xlib/pixmap-and-cursor/XCreatePixmap.html
    // `XCreateGC`: https://tronche.com/gui/x/xlib/GC/XCreateGC.html
    pub fn new(
        xlib: &xlib::Xlib,
        display: *mut xlib::Display,
        screen: c_int,
        root: xlib::Window,
        (width, height): (i32, i32),
        font: &XFont,
        cursor: xlib::Cursor,
    ) -> Self {
        unsafe {
            let depth = (xlib.XDefaultDepth)(display, screen) as c_uint;
            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.override_redirect = xlib::True;
            attrs.background_pixmap = xlib::ParentRelative as xlib::Pixmap;
            attrs.event_mask = xlib::ButtonPressMask | xlib::ExposureMask;
            let window = (xlib.XCreateWindow)(
                display,
                root,
                0,
                0,
                width as c_uint,
                height as c_uint,
                0,
                depth as c_int,
                xlib::CopyFromParent as c_uint,
                (xlib.XDefaultVisual)(display, screen),
                xlib::CWOverrideRedirect | xlib::CWBackPixmap | xlib::CWEventMask,
                &mut attrs,
            );
            (xlib.XDefineCursor)(display, window, cursor);
            (xlib.XMapRaised)(display, window);

            let drawable =
                (xlib.XCreatePixmap)(display, root, width as c_uint, height as c_uint, depth);
            let gc = (xlib.XCreateGC)(display, root, 0, ptr::null_mut());
            (xlib.XSetLineAttributes)(
                display,
                gc,
                1,
                xlib::LineSolid,
                xlib::CapButt,
                xlib::JoinMiter,
            );
            if let FontKind::Core(core) = font.kind {
                (xlib.XSetFont)(display, gc, (*core).fid);
            }
            Self {
                window,
                drawable,
                gc,
                depth,
                width,
                height,
            }
        }
    }

    // `XFreePixmap`: https://tronche.com/gui/x/xlib/pixmap-and-cursor/XFreePixmap.html
    // `XDestroyWindow`: https://tronche.com/gui/x/xlib/window/XDestroyWindow.html
    pub fn free(&self, xlib: &xlib::Xlib, display: *mut xlib::Display) {
        unsafe {
            (xlib.XFreePixmap)(display, self.drawable);
            (xlib.XFreeGC)(display, self.gc);
            (xlib.XUnmapWindow)(display, self.window);
            (xlib.XDestroyWindow)(display, self.window);
        }
    }
}

impl XWrap {
    /// Places the bar. The pixmap follows the bar width.
    // `XMoveResizeWindow`: https://tronche.com/gui/x/xlib/window/XMoveResizeWindow.html
    pub fn move_resize_bar(&mut self, geometry: Xyhw) {
        if geometry.w != self.bar.width || geometry.h != self.bar.height {
            unsafe {
                (self.xlib.XFreePixmap)(self.display, self.bar.drawable);
                self.bar.drawable = (self.xlib.XCreatePixmap)(
                    self.display,
                    self.root,
                    geometry.w.max(1) as c_uint,
                    geometry.h.max(1) as c_uint,
                    self.bar.depth,
                );
            }
            self.bar.width = geometry.w;
            self.bar.height = geometry.h;
        }
        self.move_resize_window(
            self.bar.window,
            geometry.x,
            geometry.y,
            geometry.w.max(1) as u32,
            geometry.h.max(1) as u32,
        );
    }

    /// Paints every cell into the pixmap and copies it onto the bar window.
    // `XCopyArea`: https://tronche.com/gui/x/xlib/graphics/XCopyArea.html
    pub fn draw_bar(&self, bar: &Bar) {
        for cell in &bar.cells {
            let colors = self.scheme_colors(cell.scheme);
            self.draw_text(cell, colors, bar.height);
            self.draw_square(cell, colors);
        }
        unsafe {
            (self.xlib.XCopyArea)(
                self.display,
                self.bar.drawable,
                self.bar.window,
                self.bar.gc,
                0,
                0,
                bar.width.max(1) as c_uint,
                bar.height.max(1) as c_uint,
                0,
                0,
            );
        }
        self.sync();
    }

    /// Width of `text` in the bar font.
    pub fn text_width(&self, text: &str) -> i32 {
        self.font.text_width(&self.xlib, text)
    }

    pub const fn font_height(&self) -> i32 {
        self.font.height()
    }

    pub const fn bar_window(&self) -> xlib::Window {
        self.bar.window
    }

    const fn scheme_colors(&self, scheme: Scheme) -> SchemeColors {
        scheme_colors(&self.colors, scheme)
    }

    /// Fills the cell and draws its text, cut with dots when it does not fit.
    // `XmbDrawString`: https://tronche.com/gui/x/xlib/graphics/drawing-text/XmbDrawString.html
    // `XDrawString`: https://tronche.com/gui/x/xlib/graphics/drawing-text/XDrawString.html
    fn draw_text(&self, cell: &Cell, colors: SchemeColors, height: i32) {
        unsafe {
            (self.xlib.XSetForeground)(self.display, self.bar.gc, colors.bg);
            (self.xlib.XFillRectangle)(
                self.display,
                self.bar.drawable,
                self.bar.gc,
                cell.x,
                0,
                cell.w.max(0) as c_uint,
                height.max(0) as c_uint,
            );
        }
        let Some(text) = cell.text.as_deref() else {
            return;
        };
        let pad = if cell.padded { self.font.height() } else { 0 };
        let Some(shown) = fit_text(text, cell.w - pad, |t| self.text_width(t)) else {
            return;
        };
        let x = cell.x + pad / 2;
        let y = (height + self.font.ascent - self.font.descent) / 2;
        let len = shown.len() as c_int;
        let ptr = shown.as_ptr().cast::<c_char>();
        unsafe {
            (self.xlib.XSetForeground)(self.display, self.bar.gc, colors.fg);
            match self.font.kind {
                FontKind::Set(set) => (self.xlib.XmbDrawString)(
                    self.display,
                    self.bar.drawable,
                    set,
                    self.bar.gc,
                    x,
                    y,
                    ptr,
                    len,
                ),
                FontKind::Core(_) => {
                    (self.xlib.XDrawString)(
                        self.display,
                        self.bar.drawable,
                        self.bar.gc,
                        x,
                        y,
                        ptr,
                        len,
                    );
                }
            }
        }
    }

    /// The indicator square in the top left corner of a cell.
    // `XFillRectangle`: https://tronche.com/gui/x/xlib/graphics/filling-areas/XFillRectangle.html
    // `XDrawRectangle`: https://tronche.com/gui/x/xlib/graphics/drawing/XDrawRectangle.html
    fn draw_square(&self, cell: &Cell, colors: SchemeColors) {
        let size = (self.font.height() + 2) / 4;
        unsafe {
            (self.xlib.XSetForeground)(self.display, self.bar.gc, colors.fg);
            match cell.indicator {
                Indicator::Filled => {
                    (self.xlib.XFillRectangle)(
                        self.display,
                        self.bar.drawable,
                        self.bar.gc,
                        cell.x + 1,
                        1,
                        (size + 1) as c_uint,
                        (size + 1) as c_uint,
                    );
                }
                Indicator::Outline => {
                    (self.xlib.XDrawRectangle)(
                        self.display,
                        self.bar.drawable,
                        self.bar.gc,
                        cell.x + 1,
                        1,
                        size as c_uint,
                        size as c_uint,
                    );
                }
                Indicator::None => {}
            }
        }
    }
}

const fn scheme_colors(colors: &Colors, scheme: Scheme) -> SchemeColors {
    match scheme {
        Scheme::Normal => colors.normal,
        Scheme::Selected => colors.selected,
        Scheme::Urgent => SchemeColors {
            fg: colors.normal.bg,
            bg: colors.normal.fg,
        },
        Scheme::Status(i) if i < colors.status.len() => colors.status[i],
        Scheme::Status(_) => colors.normal,
    }
}

/// The longest prefix of `text` that fits in `width`, ending in dots when cut.
fn fit_text(text: &str, width: i32, measure: impl Fn(&str) -> i32) -> Option<String> {
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        let candidate: String = chars.iter().collect();
        if measure(&candidate) <= width {
            break;
        }
        chars.pop();
    }
    if chars.is_empty() {
        return None;
    }
    let cut = chars.len() < text.chars().count();
    if cut {
        let keep = chars.len().saturating_sub(3);
        for ch in chars.iter_mut().skip(keep) {
            *ch = '.';
        }
    }
    Some(chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(text: &str) -> i32 {
        text.chars().count() as i32 * 6
    }

    #[test]
    fn short_text_is_kept() {
        assert_eq!(fit_text("term", 100, measure), Some("term".to_owned()));
    }

    #[test]
    fn long_text_ends_in_dots() {
        assert_eq!(fit_text("terminal", 36, measure), Some("ter...".to_owned()));
    }

    #[test]
    fn nothing_fits_in_a_sliver() {
        assert_eq!(fit_text("terminal", 4, measure), None);
    }

    #[test]
    fn cutting_respects_multibyte_characters() {
        assert_eq!(fit_text("ééééé", 18, measure), Some("...".to_owned()));
    }

    #[test]
    fn urgent_swaps_the_normal_colours() {
        let colors = Colors {
            normal: SchemeColors { fg: 1, bg: 2 },
            ..Colors::default()
        };
        let urgent = scheme_colors(&colors, Scheme::Urgent);
        assert_eq!((urgent.fg, urgent.bg), (2, 1));
        let unknown = scheme_colors(&colors, Scheme::Status(9));
        assert_eq!((unknown.fg, unknown.bg), (1, 2));
    }
}
