//! Mutex - pode bloquear thread, com aquisição interrompível

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// Sinal de cancelamento externo.
///
/// Modela o sinal pendente que aborta uma espera bloqueante pelo lock
/// (o equivalente de um signal entregue a um chamador dormindo).
/// Quem espera pelo lock verifica o sinal a cada iteração; quem quer
/// cancelar chama `raise()` de outra thread.
pub struct CancelSignal {
    raised: AtomicBool,
}

impl CancelSignal {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Dispara o sinal. Irreversível para a espera em curso.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Verifica se o sinal foi disparado.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Espera pelo lock abortada por um `CancelSignal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Mutex - bloqueia thread se não conseguir lock
///
/// # Aquisição interrompível
///
/// `lock_interruptible` retorna `Err(Interrupted)` se o sinal de
/// cancelamento for disparado enquanto o chamador espera. Nenhum
/// estado é tocado nesse caso.
pub struct Mutex<T> {
    /// Estado do lock
    locked: AtomicBool,
    /// Dados protegidos
    data: UnsafeCell<T>,
}

// SAFETY: Mutex protege acesso com lock
unsafe impl<T: Send> Send for Mutex<T> {}
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    pub const fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Adquire o lock (pode bloquear, não cancelável)
    pub fn lock(&self) -> MutexGuard<'_, T> {
        while !self.try_acquire() {
            core::hint::spin_loop();
        }

        MutexGuard { lock: self }
    }

    /// Adquire o lock, abortando se o sinal de cancelamento disparar.
    ///
    /// Fast path: um lock livre é adquirido mesmo com sinal já
    /// pendente — o sinal só é verificado quando o chamador teria
    /// que esperar (mesma semântica de mutex_lock_interruptible).
    pub fn lock_interruptible(
        &self,
        cancel: &CancelSignal,
    ) -> Result<MutexGuard<'_, T>, Interrupted> {
        loop {
            if self.try_acquire() {
                return Ok(MutexGuard { lock: self });
            }
            if cancel.is_raised() {
                return Err(Interrupted);
            }
            core::hint::spin_loop();
        }
    }

    /// Tenta adquirir sem bloquear
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(MutexGuard { lock: self })
        } else {
            None
        }
    }
}

pub struct MutexGuard<'a, T> {
    lock: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: Lock está adquirido
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: Lock está adquirido
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
