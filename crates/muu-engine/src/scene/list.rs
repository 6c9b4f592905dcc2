use super::{DrawCmd, ZIndex};

/// One recorded command. Paints back-to-front by `z`, then by `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    /// Position in the recording, for ties within a layer.
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Draw commands recorded for one frame.
///
/// Recording never sorts; the paint-order index is rebuilt lazily and its
/// buffer is reused from frame to frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { z, order, cmd });
        self.sorted_dirty = true;
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            // (z, order) is unique per item, so unstable is deterministic.
            let items = &self.items;
            self.sorted_indices
                .sort_unstable_by_key(|&i| (items[i].z, items[i].order));
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn rect_at(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Quad(q) => q.rect.origin.x,
                DrawCmd::DotGrid(g) => g.rect.origin.x,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::HEADER, rect_at(1.0), Color::WHITE);
        list.push_solid_rect(ZIndex::HERO, rect_at(2.0), Color::WHITE);
        list.push_solid_rect(ZIndex::HERO, rect_at(3.0), Color::WHITE);
        list.push_solid_rect(ZIndex::MENU, rect_at(4.0), Color::WHITE);

        assert_eq!(xs(&mut list), vec![2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::HERO, rect_at(1.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());

        list.push_solid_rect(ZIndex::HERO, rect_at(5.0), Color::WHITE);
        assert_eq!(list.items()[0].order, 0);
        assert_eq!(xs(&mut list), vec![5.0]);
    }
}
