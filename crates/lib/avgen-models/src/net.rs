use rand_pcg::Pcg64Mcg;
use typed_builder::TypedBuilder;

use avgen_core::metrics::{BandwidthUtil, Jitter, Latency, PacketLoss, Throughput};

use crate::attack::AttackLabel;
use crate::dist::UniformRange;

/// Sampling bounds for the five link metrics under one label.
#[derive(Debug, Clone, Copy)]
pub struct LabelRanges {
    pub latency: UniformRange,
    pub packet_loss: UniformRange,
    pub throughput: UniformRange,
    pub jitter: UniformRange,
    pub bandwidth_util: UniformRange,
}

const DOS_RANGES: LabelRanges = LabelRanges {
    latency: UniformRange::new(100.0, 300.0),
    packet_loss: UniformRange::new(5.0, 20.0),
    throughput: UniformRange::new(0.5, 2.0),
    jitter: UniformRange::new(10.0, 50.0),
    bandwidth_util: UniformRange::new(80.0, 100.0),
};

const HIJACKED_RANGES: LabelRanges = LabelRanges {
    latency: UniformRange::new(70.0, 200.0),
    packet_loss: UniformRange::new(2.0, 10.0),
    throughput: UniformRange::new(1.0, 5.0),
    jitter: UniformRange::new(5.0, 25.0),
    bandwidth_util: UniformRange::new(60.0, 90.0),
};

const NORMAL_RANGES: LabelRanges = LabelRanges {
    latency: UniformRange::new(20.0, 60.0),
    packet_loss: UniformRange::new(0.0, 1.0),
    throughput: UniformRange::new(5.0, 10.0),
    jitter: UniformRange::new(1.0, 5.0),
    bandwidth_util: UniformRange::new(20.0, 50.0),
};

/// The synthesized link quality attached to one tick.
#[derive(Copy, Clone, Debug, TypedBuilder)]
pub struct NetworkSample {
    pub latency: Latency,
    pub packet_loss: PacketLoss,
    pub throughput: Throughput,
    pub jitter: Jitter,
    pub bandwidth_util: BandwidthUtil,
}

/// Maps a tick's label to five independently drawn metric values. No state
/// is carried between calls; the output sequence is a pure function of the
/// seed and the label sequence.
#[derive(Debug, Clone)]
pub struct NetworkSynthesizer {
    rng: Pcg64Mcg,
}

impl NetworkSynthesizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::new(seed as u128),
        }
    }

    pub fn ranges(label: AttackLabel) -> &'static LabelRanges {
        match label {
            AttackLabel::DoS => &DOS_RANGES,
            AttackLabel::Hijacked => &HIJACKED_RANGES,
            AttackLabel::Normal => &NORMAL_RANGES,
        }
    }

    pub fn synthesize(&mut self, label: AttackLabel) -> NetworkSample {
        let ranges = Self::ranges(label);
        NetworkSample::builder()
            .latency(Latency::new(ranges.latency.sample(&mut self.rng)))
            .packet_loss(PacketLoss::new(ranges.packet_loss.sample(&mut self.rng)))
            .throughput(Throughput::new(ranges.throughput.sample(&mut self.rng)))
            .jitter(Jitter::new(ranges.jitter.sample(&mut self.rng)))
            .bandwidth_util(BandwidthUtil::new(ranges.bandwidth_util.sample(&mut self.rng)))
            .build()
    }
}
