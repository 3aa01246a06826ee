/// Condition flags of the DMG CPU.
///
/// Kept as four independent booleans; they are only folded into the F
/// register byte when AF crosses the stack (`PUSH AF` / `POP AF`) or is read
/// as a pair for inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Z: result was zero.
    pub z: bool,
    /// N: last operation was a subtraction.
    pub n: bool,
    /// H: carry out of bit 3 / borrow into bit 4.
    pub h: bool,
    /// C: carry out of bit 7 / borrow.
    pub c: bool,
}

impl Flags {
    const Z_BIT: u8 = 1 << 7;
    const N_BIT: u8 = 1 << 6;
    const H_BIT: u8 = 1 << 5;
    const C_BIT: u8 = 1 << 4;

    /// Pack into the upper nibble of F. The low nibble is always zero.
    #[inline]
    pub fn pack(self) -> u8 {
        let mut f = 0;
        if self.z {
            f |= Self::Z_BIT;
        }
        if self.n {
            f |= Self::N_BIT;
        }
        if self.h {
            f |= Self::H_BIT;
        }
        if self.c {
            f |= Self::C_BIT;
        }
        f
    }

    /// Unpack an F byte; bits 0-3 are ignored.
    #[inline]
    pub fn unpack(f: u8) -> Self {
        Self {
            z: f & Self::Z_BIT != 0,
            n: f & Self::N_BIT != 0,
            h: f & Self::H_BIT != 0,
            c: f & Self::C_BIT != 0,
        }
    }
}

/// Register file of the DMG CPU (Sharp LR35902).
///
/// Pairs are big-endian: the first register named in the pair holds the
/// high byte (`B` in `BC`, `A` in `AF`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Registers {
    pub a: u8,
    pub f: Flags,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f.pack()])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = Flags::unpack(f);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Read a 16-bit pair by its 2-bit opcode selector: BC, DE, HL, SP.
    #[inline]
    pub(crate) fn rp(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    #[inline]
    pub(crate) fn set_rp(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.set_bc(value),
            1 => self.set_de(value),
            2 => self.set_hl(value),
            _ => self.sp = value,
        }
    }

    /// Stack-pair variant of `rp`: AF replaces SP in the last slot.
    #[inline]
    pub(crate) fn rp2(&self, index: u8) -> u16 {
        match index & 0x03 {
            3 => self.af(),
            other => self.rp(other),
        }
    }

    #[inline]
    pub(crate) fn set_rp2(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            3 => self.set_af(value),
            other => self.set_rp(other, value),
        }
    }
}
