pub(crate) const DEFAULT_SEED: u64 = 0x5EED_7EAB;

/// xorshift128 priority source, one per treap.
#[derive(Clone, Copy, Debug)]
pub(crate) struct XorShift128 {
    state: [u32; 4],
}

impl XorShift128 {
    /// Expands `seed` with splitmix64 so that every seed, zero included,
    /// gives a non-zero state.
    pub(crate) fn new(seed: u64) -> Self {
        let mut sm = seed;
        let mut words = [0u32; 4];
        for pair in words.chunks_exact_mut(2) {
            let x = splitmix64(&mut sm);
            pair[0] = x as u32;
            pair[1] = (x >> 32) as u32;
        }
        if words == [0; 4] {
            words[3] = 88_675_123;
        }
        Self { state: words }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        let [x, y, z, w] = self.state;
        let t = x ^ (x << 11);
        let next = (w ^ (w >> 19)) ^ (t ^ (t >> 8));
        self.state = [y, z, w, next];
        next
    }

    /// An independent generator seeded from this one's stream.
    pub(crate) fn fork(&mut self) -> Self {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        Self::new((hi << 32) | lo)
    }
}

impl Default for XorShift128 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
