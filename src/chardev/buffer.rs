//! Buffer limitado de capacidade fixa
//!
//! Dados puros + invariantes; nenhuma chamada externa. Todo acesso
//! é mediado pelos handlers, com o lock do dispositivo adquirido.
//!
//! # Invariante
//!
//! `len <= CAP - 1` durante toda a vida do buffer: o último byte é
//! reservado como terminador e permanece zero. A invariante é
//! verificada em toda mutação.

/// Buffer de capacidade fixa com comprimento válido explícito.
///
/// `CAP` deve ser >= 1.
pub struct BoundedBuffer<const CAP: usize> {
    data: [u8; CAP],
    len: usize,
}

impl<const CAP: usize> BoundedBuffer<CAP> {
    /// Cria um buffer zerado e vazio.
    pub const fn new() -> Self {
        Self {
            data: [0; CAP],
            len: 0,
        }
    }

    /// Capacidade total em bytes.
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Maior comprimento válido admitido (um byte fica de terminador).
    pub const fn max_len(&self) -> usize {
        CAP - 1
    }

    /// Quantidade de bytes com dados significativos.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// O prefixo válido do buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Zera o buffer inteiro e o comprimento.
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.len = 0;
        self.check_invariant();
    }

    /// Substituição total: zera o buffer inteiro e grava `src`.
    ///
    /// Uma escrita NÃO é append; bytes além do novo comprimento ficam
    /// zero definidos, nunca restos da escrita anterior. Excesso além
    /// de `max_len()` é truncado silenciosamente. Retorna o
    /// comprimento efetivamente gravado.
    pub fn replace(&mut self, src: &[u8]) -> usize {
        let n = core::cmp::min(src.len(), self.max_len());

        self.data.fill(0);
        self.data[..n].copy_from_slice(&src[..n]);
        self.len = n;

        self.check_invariant();
        n
    }

    fn check_invariant(&self) {
        debug_assert!(self.len <= CAP - 1, "valid_length excede a capacidade");
        debug_assert_eq!(self.data[CAP - 1], 0, "terminador corrompido");
    }
}

impl<const CAP: usize> Default for BoundedBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}
