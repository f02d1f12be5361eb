// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textures and sounds loaded by name.
//!
//! Missing assets never fail a frame: textures fall back to a loud
//! placeholder square and sounds to `None`, both with a logged warning.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spriteui_theme::{Color, ThemeError};

use crate::graphics::{RenderBackend, Texture};

/// Size of the placeholder texture handed out for missing textures.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// Raw sound data found on disk. Playback is up to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    /// The name the sound was requested with.
    pub name: String,
    /// The file the sound was read from.
    pub path: PathBuf,
    /// Undecoded file contents.
    pub data: Arc<[u8]>,
}

/// Loads assets by name.
pub trait AssetProvider {
    /// Load a texture, cached by name. Never fails; a placeholder is returned
    /// for textures that cannot be loaded.
    fn load_texture(&mut self, backend: &mut dyn RenderBackend, name: &str) -> Texture;

    /// If a texture with this name can be found.
    fn texture_exists(&self, name: &str) -> bool;

    /// Load a sound, or `None` if it cannot be found.
    fn load_sound(&mut self, name: &str) -> Option<Sound>;

    /// Create a texture filled with one color.
    fn create_solid_texture(
        &mut self,
        backend: &mut dyn RenderBackend,
        color: Color,
        width: u32,
        height: u32,
    ) -> Texture {
        let width = width.max(1);
        let height = height.max(1);
        let pixels = vec![color; (width * height) as usize];
        backend.create_texture(width, height, &pixels)
    }
}

/// Parse a color from `"r,g,b"` or `"r,g,b,a"`.
pub fn color_from_string(value: &str) -> Result<Color, ThemeError> {
    Color::parse(value)
}

/// Parse a color, falling back to `default` (with a warning) if `value` is malformed.
pub fn color_from_string_or(value: &str, default: Color) -> Color {
    Color::parse_or(value, default)
}

/// File-system [AssetProvider] searching a list of content directories.
#[derive(Debug, Default)]
pub struct ContentLoader {
    search_paths: Vec<PathBuf>,
    textures: HashMap<String, Texture>,
    placeholder: Option<Texture>,
}

impl ContentLoader {
    /// Create a loader without search paths. Every texture is a placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to search, after the existing ones.
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Add several directories to search.
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// The directories searched, in order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Forget every cached texture.
    pub fn clear_cache(&mut self) {
        self.textures.clear();
    }

    fn find(&self, name: &str, default_extensions: &[&str]) -> Option<PathBuf> {
        for dir in &self.search_paths {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if Path::new(name).extension().is_none() {
                for extension in default_extensions {
                    let candidate = dir.join(format!("{}.{}", name, extension));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    fn decode(path: &Path) -> Result<(u32, u32, Vec<Color>), String> {
        let bytes = fs::read(path).map_err(|err| err.to_string())?;
        let image = image::load_from_memory(&bytes).map_err(|err| err.to_string())?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| Color::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
            .collect();
        Ok((width, height, pixels))
    }

    fn placeholder(&mut self, backend: &mut dyn RenderBackend) -> Texture {
        if let Some(texture) = &self.placeholder {
            return texture.clone();
        }

        let texture = self.create_solid_texture(
            backend,
            Color::PLACEHOLDER,
            PLACEHOLDER_SIZE,
            PLACEHOLDER_SIZE,
        );
        self.placeholder = Some(texture.clone());
        texture
    }
}

impl AssetProvider for ContentLoader {
    fn load_texture(&mut self, backend: &mut dyn RenderBackend, name: &str) -> Texture {
        if let Some(texture) = self.textures.get(name) {
            return texture.clone();
        }

        let loaded = match self.find(name, &["png"]) {
            Some(path) => match Self::decode(&path) {
                Ok((width, height, pixels)) => {
                    log::debug!("Loaded texture {} from {}", name, path.display());
                    Some(backend.create_texture(width, height, &pixels))
                },
                Err(err) => {
                    log::warn!("Failed to decode texture {}: {}", path.display(), err);
                    None
                },
            },
            None => {
                log::warn!("Texture {} not found, using placeholder", name);
                None
            },
        };

        let texture = match loaded {
            Some(texture) => texture,
            None => self.placeholder(backend),
        };
        self.textures.insert(name.to_string(), texture.clone());
        texture
    }

    fn texture_exists(&self, name: &str) -> bool {
        self.textures.contains_key(name) || self.find(name, &["png"]).is_some()
    }

    fn load_sound(&mut self, name: &str) -> Option<Sound> {
        let Some(path) = self.find(name, &["wav", "ogg"]) else {
            log::warn!("Sound {} not found", name);
            return None;
        };

        match fs::read(&path) {
            Ok(data) => Some(Sound {
                name: name.to_string(),
                path,
                data: data.into(),
            }),
            Err(err) => {
                log::warn!("Failed to read sound {}: {}", path.display(), err);
                None
            },
        }
    }
}
