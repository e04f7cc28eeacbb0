//! Fronteira de cópia kernel <-> userspace
//!
//! Toda cópia que atravessa a fronteira pode falhar: o endereço do
//! chamador pode ser inválido ou a página pode rejeitar o acesso.
//! Os traits abaixo modelam essa falibilidade (o par copy_to_user /
//! copy_from_user); o driver nunca toca memória do chamador
//! diretamente, apenas através deles.
//!
//! As implementações sobre slices servem para chamadores em
//! kernel-space e para os testes.

use crate::chardev::error::DevError;

/// Falha de cópia na fronteira (endereço inválido do chamador).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

impl From<Fault> for DevError {
    fn from(_: Fault) -> Self {
        DevError::Fault
    }
}

/// Fonte de dados do chamador (lado write do driver).
pub trait UserBufferReader {
    /// Quantidade de bytes que o chamador ofereceu.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copia `out.len()` bytes do chamador para `out`.
    ///
    /// Tudo-ou-nada: em caso de `Fault`, nada de `out` é confiável
    /// e nenhum byte foi consumido.
    fn read_slice(&mut self, out: &mut [u8]) -> Result<(), Fault>;
}

/// Destino de dados no chamador (lado read do driver).
pub trait UserBufferWriter {
    /// Quantidade de bytes que o chamador pediu.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copia `data` para o chamador.
    ///
    /// Tudo-ou-nada: em caso de `Fault`, o destino é inválido.
    fn write_slice(&mut self, data: &[u8]) -> Result<(), Fault>;
}

/// Fonte baseada em slice (chamador em kernel-space).
pub struct UserSliceReader<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> UserSliceReader<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }
}

impl UserBufferReader for UserSliceReader<'_> {
    fn len(&self) -> usize {
        self.src.len() - self.pos
    }

    fn read_slice(&mut self, out: &mut [u8]) -> Result<(), Fault> {
        if out.len() > self.len() {
            return Err(Fault);
        }
        out.copy_from_slice(&self.src[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }
}

/// Destino baseado em slice (chamador em kernel-space).
pub struct UserSliceWriter<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> UserSliceWriter<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    /// Bytes efetivamente escritos até agora.
    pub fn written(&self) -> usize {
        self.pos
    }
}

impl UserBufferWriter for UserSliceWriter<'_> {
    fn len(&self) -> usize {
        self.dst.len() - self.pos
    }

    fn write_slice(&mut self, data: &[u8]) -> Result<(), Fault> {
        if data.len() > self.len() {
            return Err(Fault);
        }
        self.dst[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
        Ok(())
    }
}
