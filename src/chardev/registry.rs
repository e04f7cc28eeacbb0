//! Registro de dispositivos e publicação de nodes
//!
//! Duas metades do contrato com o host:
//!
//! - `DeviceRegistry`: aloca identidades numéricas (major/minor),
//!   vincula as operações do driver à identidade e despacha open().
//! - `DeviceClass`: publica o node visível ao usuário (/dev/...)
//!   sob uma classe de dispositivos.
//!
//! A camada de despacho garante que nenhuma operação chega a uma
//! identidade antes do vínculo nem depois da desmontagem: abrir uma
//! identidade sem dispositivo vinculado devolve `NoDevice`.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use spin::Mutex;

use super::device::{CharDevice, DeviceNode, DeviceNumber};
use super::error::DevError;
use super::operations::{FileContext, OpenFile, OpenFlags};
use crate::{kdebug, kinfo, kwarn};

/// Topo da faixa de majors de alocação dinâmica
const DYNAMIC_MAJOR_MAX: u32 = 254;

/// Base da faixa de majors de alocação dinâmica
const DYNAMIC_MAJOR_MIN: u32 = 128;

/// Região de identidade registrada por um driver
struct Region {
    name: &'static str,
    /// Operações vinculadas (None entre register e bind)
    device: Option<Arc<dyn CharDevice>>,
}

/// Registro de dispositivos de caractere
pub struct DeviceRegistry {
    /// Regiões por device number (formato u64 do Linux)
    regions: Mutex<BTreeMap<u64, Region>>,
}

impl DeviceRegistry {
    /// Cria um registro vazio
    pub const fn new() -> Self {
        Self {
            regions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Registra uma região de identidade para `name`.
    ///
    /// `major = 0` pede alocação dinâmica, varrendo a faixa dinâmica
    /// de cima para baixo. Major já em uso devolve `Busy`; faixa
    /// esgotada devolve `Exhausted`.
    pub fn register_region(
        &self,
        major: u32,
        name: &'static str,
    ) -> Result<DeviceNumber, DevError> {
        let mut regions = self.regions.lock();

        let major = if major != 0 {
            let dev = DeviceNumber::new(major, 0);
            if regions.contains_key(&dev.as_u64()) {
                return Err(DevError::Busy);
            }
            major
        } else {
            // Alocação dinâmica: primeiro major livre do topo
            let mut found = None;
            for candidate in (DYNAMIC_MAJOR_MIN..=DYNAMIC_MAJOR_MAX).rev() {
                if !regions.contains_key(&DeviceNumber::new(candidate, 0).as_u64()) {
                    found = Some(candidate);
                    break;
                }
            }
            found.ok_or(DevError::Exhausted)?
        };

        let dev = DeviceNumber::new(major, 0);
        regions.insert(dev.as_u64(), Region { name, device: None });

        kinfo!("(CHRDEV) Major alocado=", dev.major);
        Ok(dev)
    }

    /// Libera uma região de identidade.
    pub fn unregister_region(&self, dev: DeviceNumber) {
        self.regions.lock().remove(&dev.as_u64());
        kdebug!("(CHRDEV) Major liberado=", dev.major);
    }

    /// Vincula as operações de um dispositivo à identidade.
    pub fn bind(&self, dev: DeviceNumber, device: Arc<dyn CharDevice>) -> Result<(), DevError> {
        let mut regions = self.regions.lock();
        let region = regions.get_mut(&dev.as_u64()).ok_or(DevError::NoDevice)?;

        if region.device.is_some() {
            return Err(DevError::Busy);
        }
        region.device = Some(device);
        Ok(())
    }

    /// Desvincula as operações (a identidade continua registrada).
    pub fn unbind(&self, dev: DeviceNumber) {
        match self.regions.lock().get_mut(&dev.as_u64()) {
            Some(region) => region.device = None,
            None => kwarn!("(CHRDEV) unbind sem regiao, dev=", dev.as_u64()),
        }
    }

    /// Nome registrado para uma identidade.
    pub fn lookup_name(&self, dev: DeviceNumber) -> Option<&'static str> {
        self.regions.lock().get(&dev.as_u64()).map(|r| r.name)
    }

    /// Despacho de open(): cria um handle para a identidade.
    pub fn open(&self, dev: DeviceNumber, flags: OpenFlags) -> Result<OpenFile, DevError> {
        let device = {
            let regions = self.regions.lock();
            let region = regions.get(&dev.as_u64()).ok_or(DevError::NoDevice)?;
            region.device.clone().ok_or(DevError::NoDevice)?
        };

        let mut ctx = FileContext::new(flags);
        device.open(&mut ctx)?;

        Ok(OpenFile::new(device, ctx))
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Classe de dispositivos: publica nodes visíveis ao usuário
pub struct DeviceClass {
    name: &'static str,
    /// Nodes publicados, por device number
    nodes: Mutex<BTreeMap<u64, DeviceNode>>,
}

impl DeviceClass {
    /// Cria uma classe vazia
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            nodes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Nome da classe
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Publica um node. Nome ou identidade já publicados devolvem `Busy`.
    pub fn create_node(&self, node: DeviceNode) -> Result<(), DevError> {
        let mut nodes = self.nodes.lock();

        if nodes.contains_key(&node.dev.as_u64()) {
            return Err(DevError::Busy);
        }
        if nodes.values().any(|n| n.name == node.name) {
            return Err(DevError::Busy);
        }

        kinfo!("(CHRDEV) Node publicado, dev=", node.dev.as_u64());
        nodes.insert(node.dev.as_u64(), node);
        Ok(())
    }

    /// Remove um node publicado.
    pub fn destroy_node(&self, dev: DeviceNumber) {
        self.nodes.lock().remove(&dev.as_u64());
        kdebug!("(CHRDEV) Node removido, dev=", dev.as_u64());
    }

    /// Resolve um nome de node para a identidade.
    pub fn lookup(&self, name: &str) -> Option<DeviceNumber> {
        self.nodes
            .lock()
            .values()
            .find(|n| n.name == name)
            .map(|n| n.dev)
    }
}
