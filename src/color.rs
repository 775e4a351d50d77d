use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// Common interface to all pixel representations that can be saved
pub trait Color: Copy {
    /// Convert color to sRGB list
    fn to_rgb(self) -> [u8; 3];

    /// Calculate LUMA of the color.
    fn luma(self) -> f32 {
        let [r, g, b] = self.to_rgb();
        0.2126 * (r as f32 / 255.0) + 0.7152 * (g as f32 / 255.0) + 0.0722 * (b as f32 / 255.0)
    }
}

/// Color channel of the `Rgb` pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of the channel inside `Rgb`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl FromStr for Channel {
    type Err = ColorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Channel::Red),
            "g" | "green" => Ok(Channel::Green),
            "b" | "blue" => Ok(Channel::Blue),
            _ => Err(ColorError::ChannelExpected),
        }
    }
}

/// 8-bit per channel RGB pixel, laid out as `[r, g, b]` in memory
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    /// Intensity of a single channel
    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        self.0[channel.index()]
    }

    /// Mutable reference to a single channel
    #[inline]
    pub fn channel_mut(&mut self, channel: Channel) -> &mut u8 {
        &mut self.0[channel.index()]
    }
}

impl Color for Rgb {
    fn to_rgb(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        let [fg_r, fg_g, fg_b] = if self.luma() > 0.5 {
            [0, 0, 0]
        } else {
            [255, 255, 255]
        };
        write!(
            fmt,
            "\x1b[38;2;{};{};{};48;2;{};{};{}m",
            fg_r, fg_g, fg_b, r, g, b
        )?;
        write!(fmt, "{}", self)?;
        write!(fmt, "\x1b[m")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && color.len() == 7 {
            // #RRGGBB
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok((digit(pair[0])? << 4) | digit(pair[1])?));
            Ok(Rgb::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = String::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
    ChannelExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB in hexidemical format")
            }
            ColorError::ChannelExpected => {
                write!(f, "Channel expected to be one of red, green, blue")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!([1, 2, 3], c.to_rgb());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(2, c.channel(Channel::Green));

        let mut c = Rgb::BLACK;
        *c.channel_mut(Channel::Blue) = 255;
        assert_eq!(c, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        assert_eq!(Rgb::new(170, 187, 204), "#aabbcc".parse::<Rgb>()?);
        assert_eq!(Rgb::new(170, 187, 204), "#AABBCC".parse::<Rgb>()?);
        let c: Rgb = "#010203".parse()?;
        assert_eq!(c.to_string(), "#010203");
        assert!("#01020304".parse::<Rgb>().is_err());
        assert!("010203".parse::<Rgb>().is_err());
        assert!("#01020g".parse::<Rgb>().is_err());
        Ok(())
    }

    #[test]
    fn test_channel_parse() -> Result<(), ColorError> {
        assert_eq!("red".parse::<Channel>()?, Channel::Red);
        assert_eq!("G".parse::<Channel>()?, Channel::Green);
        assert_eq!("blue".parse::<Channel>()?, Channel::Blue);
        assert!("alpha".parse::<Channel>().is_err());
        Ok(())
    }

    #[test]
    fn test_rgb_bytes() {
        let pixels = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }
}
