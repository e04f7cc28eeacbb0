//! Erros do subsistema de dispositivos de caractere

/// Erro de operação de dispositivo
///
/// Todos os erros dos handlers voltam como status para o chamador
/// imediato; nenhum é engolido, nenhum derruba o kernel. Os únicos
/// erros fatais são os de inicialização (região/node), que disparam
/// a desmontagem ordenada do que já foi adquirido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevError {
    /// Espera pelo lock abortada por sinal de cancelamento (EINTR)
    Interrupted,
    /// Cópia na fronteira kernel/userspace falhou (EFAULT)
    Fault,
    /// Comando de ioctl desconhecido (ENOTTY)
    InvalidCommand,
    /// Modo de abertura não permite a operação (EACCES)
    PermissionDenied,
    /// Nenhum dispositivo vinculado à identidade (ENODEV)
    NoDevice,
    /// Identidade ou node já em uso (EBUSY)
    Busy,
    /// Sem identidades livres na faixa dinâmica (ENOMEM)
    Exhausted,
}

impl DevError {
    /// Código errno negativo correspondente (convenção Linux).
    pub const fn errno(&self) -> i32 {
        match self {
            DevError::Interrupted => -4,       // EINTR
            DevError::Fault => -14,            // EFAULT
            DevError::InvalidCommand => -25,   // ENOTTY
            DevError::PermissionDenied => -13, // EACCES
            DevError::NoDevice => -19,         // ENODEV
            DevError::Busy => -16,             // EBUSY
            DevError::Exhausted => -12,        // ENOMEM
        }
    }

    /// Erros recuperáveis podem ser tentados de novo pelo chamador.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, DevError::Busy | DevError::Exhausted)
    }
}
