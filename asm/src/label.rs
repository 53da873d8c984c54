use indexmap::IndexMap;

use crate::{error::Error, token::Pos};

/// Label name -> (definition site, absolute address), in definition order.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    labels: IndexMap<String, (Pos, u32)>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, pos: Pos, addr: u32) -> Result<(), Error> {
        if let Some(&(first, _)) = self.labels.get(name) {
            return Err(Error::DuplicateLabel {
                name: name.to_string(),
                pos,
                first,
            });
        }
        log::trace!("label `{}` = 0x{:08X}", name, addr);
        self.labels.insert(name.to_string(), (pos, addr));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).map(|&(_, addr)| addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels
            .iter()
            .map(|(name, &(_, addr))| (name.as_str(), addr))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `name: address` mapping as YAML.
    pub fn to_yaml(&self) -> Result<String, Error> {
        let map: IndexMap<&str, u32> = self.iter().collect();
        Ok(serde_yaml::to_string(&map)?)
    }
}
