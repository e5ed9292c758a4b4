//! Decorations applied to the pieces of the usage text.

use self::color::*;
use std::{
    borrow::Cow,
    fmt::{self, Display},
};
use termion::{
    color::{Color, Fg, Rgb},
    style::{Bold, Italic, Reset, Underline},
};

const MAXIMUM_WIDTH: usize = 80;

pub struct Pretty;
pub struct Plain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Item {
    Head,
    Name,
    Section,
    Flag,
    Command,
    Help,
    Description,
}

/// Text that knows how many columns it occupies once printed. Escape
/// sequences occupy none.
pub trait Format {
    fn width(&self) -> usize;
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result;
}

pub trait Style {
    fn width(&self) -> usize;
    fn begin(&self, item: Item) -> &dyn Format;
    fn end(&self, item: Item) -> &dyn Format;
}

pub struct Styled<'a, T: ?Sized> {
    style: &'a dyn Style,
    item: Item,
    value: &'a T,
}

pub fn styled<'a, T: Format + ?Sized>(style: &'a dyn Style, item: Item, value: &'a T) -> Styled<'a, T> {
    Styled { style, item, value }
}

impl<T: Format + ?Sized> Display for Styled<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.begin(self.item).format(formatter)?;
        self.value.format(formatter)?;
        self.style.end(self.item).format(formatter)
    }
}

macro_rules! format {
    ($type: ty, $count: expr) => {
        impl Format for $type {
            #[inline]
            fn width(&self) -> usize {
                $count
            }

            #[inline]
            fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(self, formatter)
            }
        }
    };
}

macro_rules! tuple {
    ($or: ident $(, $name: ident, $index: tt)*) => {
        impl<$($name: Format),*> Format for ($($name,)*) {
            #[inline]
            fn width(&self) -> usize {
                $(self.$index.width() + )* 0
            }

            #[inline]
            fn format(&self, _formatter: &mut fmt::Formatter) -> fmt::Result {
                $(self.$index.format(_formatter)?;)*
                Ok(())
            }
        }

        impl<$($name: Format),*> Format for orn::$or<$($name,)*> {
            #[inline]
            fn width(&self) -> usize {
                match self {
                    $(orn::$or::$name(value) => value.width(),)*
                }
            }

            #[inline]
            fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $(orn::$or::$name(value) => value.format(formatter),)*
                }
            }
        }
    };
}

tuple!(Or2, T0, 0, T1, 1);
tuple!(Or3, T0, 0, T1, 1, T2, 2);
tuple!(Or4, T0, 0, T1, 1, T2, 2, T3, 3);

impl<T: Format + ?Sized> Format for &T {
    #[inline]
    fn width(&self) -> usize {
        T::width(self)
    }

    #[inline]
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        T::format(self, formatter)
    }
}

impl<T: Format> Format for [T] {
    fn width(&self) -> usize {
        self.iter().map(Format::width).sum()
    }

    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        self.iter().try_for_each(|item| item.format(formatter))
    }
}

impl<T: Format, const N: usize> Format for [T; N] {
    fn width(&self) -> usize {
        self.as_slice().width()
    }

    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        self.as_slice().format(formatter)
    }
}

impl Format for str {
    #[inline]
    fn width(&self) -> usize {
        self.chars().count()
    }

    #[inline]
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self)
    }
}

impl Format for String {
    #[inline]
    fn width(&self) -> usize {
        self.as_str().width()
    }

    #[inline]
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self)
    }
}

impl Format for Cow<'_, str> {
    #[inline]
    fn width(&self) -> usize {
        str::width(self)
    }

    #[inline]
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self)
    }
}

impl<C: Color> Format for Fg<C> {
    #[inline]
    fn width(&self) -> usize {
        0
    }

    #[inline]
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

format!(char, 1);
format!(Reset, 0);
format!(Bold, 0);
format!(Italic, 0);
format!(Underline, 0);

macro_rules! dynamic {
    ($($value: expr),*) => {
        &[$(&$value as &dyn Format),*]
    };
}

impl Style for Pretty {
    fn width(&self) -> usize {
        term_size::dimensions().map_or(MAXIMUM_WIDTH, |(width, _)| width.min(MAXIMUM_WIDTH))
    }

    fn begin(&self, item: Item) -> &dyn Format {
        const HEAD: Fg<Rgb> = Fg(RUBY_RED);
        const FLAG: Fg<Rgb> = Fg(TURQUOISE);

        match item {
            Item::Head => dynamic!(Bold, HEAD),
            Item::Name => dynamic!(Bold, FLAG),
            Item::Section => dynamic!(Bold, Underline, Fg(OCEAN_BLUE)),
            Item::Flag => dynamic!(FLAG),
            Item::Command => dynamic!(Bold, FLAG),
            Item::Help => dynamic!(Fg(PEACH)),
            Item::Description => dynamic!(Italic, Fg(SALMON_PINK)),
        }
    }

    fn end(&self, _: Item) -> &dyn Format {
        dynamic!(Reset)
    }
}

impl Style for Plain {
    #[inline]
    fn width(&self) -> usize {
        MAXIMUM_WIDTH
    }

    #[inline]
    fn begin(&self, _: Item) -> &dyn Format {
        &""
    }

    #[inline]
    fn end(&self, _: Item) -> &dyn Format {
        &""
    }
}

pub mod color {
    use termion::color::Rgb;

    pub const OCEAN_BLUE: Rgb = Rgb(36, 113, 163);
    pub const TURQUOISE: Rgb = Rgb(64, 224, 208);
    pub const RUBY_RED: Rgb = Rgb(220, 20, 60);
    pub const PEACH: Rgb = Rgb(255, 218, 185);
    pub const SALMON_PINK: Rgb = Rgb(255, 145, 164);
}
