use eframe::egui;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

// ====================================
// DISK CACHE
// ====================================

pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("Holidaze")
        .join("media")
}

/// Cache file for a URL: sha256 of the URL, hex encoded
pub fn cache_path(dir: &Path, url: &str) -> PathBuf {
    let hash = Sha256::digest(url.as_bytes());
    dir.join(format!("{:x}.img", hash))
}

pub fn read_cached(dir: &Path, url: &str) -> Option<Vec<u8>> {
    fs::read(cache_path(dir, url)).ok().filter(|bytes| !bytes.is_empty())
}

pub fn store_cached(dir: &Path, url: &str, bytes: &[u8]) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(cache_path(dir, url), bytes)
}

/// Longest side kept after decoding; the gallery viewer is the largest consumer
pub const MAX_IMAGE_SIDE: u32 = 1280;

/// Textures kept alive at once; least recently drawn go first
pub const MAX_TEXTURES: usize = 64;

pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let mut decoded = image::load_from_memory(bytes)?;
    if decoded.width().max(decoded.height()) > MAX_IMAGE_SIDE {
        decoded = decoded.thumbnail(MAX_IMAGE_SIDE, MAX_IMAGE_SIDE);
    }
    let rgba = decoded.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba))
}

async fn download(url: &str) -> Result<Vec<u8>, String> {
    let response = crate::utils::http::client()
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("status {}", response.status()));
    }
    response.bytes().await.map(|b| b.to_vec()).map_err(|e| e.to_string())
}

/// Disk cache first, then the network. Valid downloads are written back to disk.
fn load_image(dir: &Path, url: &str) -> Option<egui::ColorImage> {
    if let Some(bytes) = read_cached(dir, url) {
        match decode_image(&bytes) {
            Ok(img) => return Some(img),
            Err(e) => log::warn!("[Media] Disk cache for {} corrupted, re-downloading: {}", url, e),
        }
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("[Media] Failed to start runtime: {}", e);
            return None;
        }
    };

    match rt.block_on(download(url)) {
        Ok(bytes) => match decode_image(&bytes) {
            Ok(img) => {
                if let Err(e) = store_cached(dir, url, &bytes) {
                    log::warn!("[Media] Could not cache {}: {}", url, e);
                }
                log::debug!("[Media] Downloaded {} ({} bytes)", url, bytes.len());
                Some(img)
            }
            Err(e) => {
                log::warn!("[Media] {} is not a readable image: {}", url, e);
                None
            }
        },
        Err(e) => {
            log::warn!("[Media] Download of {} failed: {}", url, e);
            None
        }
    }
}

// ====================================
// TEXTURE CACHE
// ====================================

/// Venue and profile images as egui textures, loaded in the background
pub struct MediaCache {
    dir: PathBuf,
    textures: HashMap<String, (egui::TextureHandle, u64)>,
    tick: u64,
    pending: HashSet<String>,
    failed: HashSet<String>,
    tx: Sender<(String, Option<egui::ColorImage>)>,
    rx: Receiver<(String, Option<egui::ColorImage>)>,
}

impl MediaCache {
    pub fn new() -> Self {
        Self::with_dir(default_cache_dir())
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        let (tx, rx) = channel();
        Self {
            dir,
            textures: HashMap::new(),
            tick: 0,
            pending: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Texture for `url` if ready; otherwise starts loading it and returns `None`
    pub fn texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        self.tick += 1;
        if let Some((texture, last_used)) = self.textures.get_mut(url) {
            *last_used = self.tick;
            return Some(texture.clone());
        }
        if !self.failed.contains(url) && self.pending.insert(url.to_string()) {
            self.spawn_load(ctx, url.to_string());
        }
        None
    }

    pub fn is_failed(&self, url: &str) -> bool {
        self.failed.contains(url.trim())
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    fn spawn_load(&self, ctx: &egui::Context, url: String) {
        let tx = self.tx.clone();
        let dir = self.dir.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let image = load_image(&dir, &url);
            let _ = tx.send((url, image));
            ctx.request_repaint();
        });
    }

    /// Upload finished images; call once per frame
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((url, image)) = self.rx.try_recv() {
            self.pending.remove(&url);
            match image {
                Some(image) => self.insert_texture(ctx, url, image),
                None => {
                    self.failed.insert(url);
                }
            }
        }
    }

    fn insert_texture(&mut self, ctx: &egui::Context, url: String, image: egui::ColorImage) {
        let texture = ctx.load_texture(&url, image, egui::TextureOptions::LINEAR);
        self.tick += 1;
        self.textures.insert(url, (texture, self.tick));

        while self.textures.len() > MAX_TEXTURES {
            let Some(oldest) = self
                .textures
                .iter()
                .min_by_key(|(_, (_, last_used))| *last_used)
                .map(|(url, _)| url.clone())
            else {
                break;
            };
            log::debug!("[Media] Evicting texture {}", oldest);
            self.textures.remove(&oldest);
        }
    }

    /// Forget failures so a changed URL (profile images) is tried again
    pub fn retry_failed(&mut self) {
        self.failed.clear();
    }
}

impl Default for MediaCache {
    fn default() -> Self {
        Self::new()
    }
}
