use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
  SetShardCount(usize),
  SetShardsPerCpu(usize),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetShardCount(shard_count) => {
        config.set_shard_count(*shard_count);
      }
      ConfigOption::SetShardsPerCpu(shards_per_cpu) => {
        config.set_shards_per_cpu(*shards_per_cpu);
      }
    }
  }

  pub fn with_shard_count(shard_count: usize) -> ConfigOption {
    ConfigOption::SetShardCount(shard_count)
  }

  pub fn with_shards_per_cpu(shards_per_cpu: usize) -> ConfigOption {
    ConfigOption::SetShardsPerCpu(shards_per_cpu)
  }
}
