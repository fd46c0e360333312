use crate::model::Rect;

/// Guillotine packer over a fixed surface.
///
/// Placement is bottom-left: among free regions large enough, the one with
/// the lowest y (then lowest x, then list order) wins, and the rectangle is
/// placed at that region's top-left corner. The consumed region is split into
/// up to four leftover strips. Free regions may overlap each other, but never
/// a placed rectangle; `insert` restores that invariant after each placement
/// by re-splitting any free region that still overlaps placed content.
pub struct GuillotinePacker {
    width: u32,
    height: u32,
    free: Vec<Rect>,
    placed: Vec<Rect>,
}

impl GuillotinePacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            free: vec![Rect::new(0, 0, width, height)],
            placed: Vec::new(),
        }
    }

    /// Place a `w` x `h` rectangle. Returns its slot, or `None` when no free
    /// region fits it.
    pub fn insert(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w > self.width || h > self.height {
            return None;
        }
        let idx = self.choose(w, h)?;
        let region = self.free.remove(idx);
        let slot = Rect::new(region.x, region.y, w, h);
        self.placed.push(slot);
        self.split(&region, &slot);
        self.prune();
        Some(slot)
    }

    /// Lowest y first, then lowest x; earlier list entries win exact ties.
    fn choose(&self, w: u32, h: u32) -> Option<usize> {
        let mut best: Option<(u64, usize)> = None;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w >= w && fr.h >= h {
                let score = ((fr.y as u64) << 32) | fr.x as u64;
                if best.is_none_or(|(s, _)| score < s) {
                    best = Some((score, i));
                }
            }
        }
        best.map(|(_, i)| i)
    }

    /// Strips of `region` left unclaimed by `slot`: right, below, left,
    /// above. Zero-extent strips are discarded.
    fn split(&mut self, region: &Rect, slot: &Rect) {
        let region_x2 = region.x + region.w;
        let region_y2 = region.y + region.h;
        let slot_x2 = slot.x + slot.w;
        let slot_y2 = slot.y + slot.h;

        if slot_x2 < region_x2 {
            self.free
                .push(Rect::new(slot_x2, region.y, region_x2 - slot_x2, region.h));
        }
        if slot_y2 < region_y2 {
            self.free
                .push(Rect::new(region.x, slot_y2, region.w, region_y2 - slot_y2));
        }
        if slot.x > region.x {
            self.free
                .push(Rect::new(region.x, region.y, slot.x - region.x, region.h));
        }
        if slot.y > region.y {
            self.free
                .push(Rect::new(region.x, region.y, region.w, slot.y - region.y));
        }
    }

    fn prune(&mut self) {
        self.prune_contained();
        self.resplit_overlaps();
    }

    /// Drop free regions fully contained in another.
    fn prune_contained(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Split any free region that still overlaps a placed rectangle into its
    /// non-overlapping remainders. Splits against one placed rectangle at a
    /// time; replacement parts are appended and revisited, so a region
    /// overlapping several placements resolves fully.
    fn resplit_overlaps(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let region = self.free[i];
            let hit = self.placed.iter().find(|p| region.overlaps(p)).copied();
            if let Some(placed) = hit {
                self.free.remove(i);
                let parts = split_around(&region, &placed);
                self.free.extend(parts);
                continue;
            }
            i += 1;
        }
    }

    pub fn free_regions(&self) -> &[Rect] {
        &self.free
    }

    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }

    /// True if any two placed rectangles share interior area. A successful
    /// run must never observe this.
    pub fn has_overlapping_placements(&self) -> bool {
        for i in 0..self.placed.len() {
            for j in (i + 1)..self.placed.len() {
                if self.placed[i].overlaps(&self.placed[j]) {
                    return true;
                }
            }
        }
        false
    }

    /// Placed area over surface area (0.0 to 1.0).
    pub fn occupancy(&self) -> f64 {
        let total = self.width as u64 * self.height as u64;
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self.placed.iter().map(Rect::area).sum();
        used as f64 / total as f64
    }
}

/// The parts of `region` not covered by `placed`: full-width strips above and
/// below the overlap, plus left/right strips spanning the overlap band.
fn split_around(region: &Rect, placed: &Rect) -> Vec<Rect> {
    let region_x2 = region.x + region.w;
    let region_y2 = region.y + region.h;
    let placed_x2 = placed.x + placed.w;
    let placed_y2 = placed.y + placed.h;
    let band_y1 = region.y.max(placed.y);
    let band_y2 = region_y2.min(placed_y2);

    let mut parts = Vec::new();
    if region.y < placed.y {
        parts.push(Rect::new(region.x, region.y, region.w, placed.y - region.y));
    }
    if region_y2 > placed_y2 {
        parts.push(Rect::new(region.x, placed_y2, region.w, region_y2 - placed_y2));
    }
    if region.x < placed.x {
        parts.push(Rect::new(
            region.x,
            band_y1,
            placed.x - region.x,
            band_y2 - band_y1,
        ));
    }
    if region_x2 > placed_x2 {
        parts.push(Rect::new(
            placed_x2,
            band_y1,
            region_x2 - placed_x2,
            band_y2 - band_y1,
        ));
    }
    parts.retain(|r| r.w > 0 && r.h > 0);
    parts
}
