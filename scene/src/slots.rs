/// Generational slot storage.
///
/// Removing a value bumps the slot generation before the slot is recycled,
/// so `(index, generation)` pairs handed out earlier never resolve to a
/// different value.
pub(crate) struct Slots<T> {
    entries: Vec<Slot<T>>,
    /// Recyclable indices (LIFO stack).
    free_list: Vec<u32>,
    count: usize,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            count: 0,
        }
    }

    /// Store a value, reusing a recycled slot if available.
    pub fn insert(&mut self, value: T) -> (u32, u32) {
        self.count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.entries[index as usize];
            slot.value = Some(value);
            (index, slot.generation)
        } else {
            let index = self.entries.len() as u32;
            self.entries.push(Slot {
                generation: 0,
                value: Some(value),
            });
            (index, 0)
        }
    }

    /// Remove a value. Returns `None` if the slot is empty or the generation is stale.
    pub fn remove(&mut self, index: u32, generation: u32) -> Option<T> {
        let slot = self.entries.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index);
        self.count -= 1;
        Some(value)
    }

    pub fn get(&self, index: u32, generation: u32) -> Option<&T> {
        self.entries
            .get(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut T> {
        self.entries
            .get_mut(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Iterate over occupied slots as `(index, generation, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (index as u32, slot.generation, value))
        })
    }
}
