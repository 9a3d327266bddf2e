use crate::core::{
    arena::Arena,
    geometry::{Bounds3f, Vector3f},
    intersect::{frustum_box_intersect, triangle_ray_intersect, Frustum, IsectInfo},
    mesh::Mesh,
    packet::{Packet, RAYS_PER_PACKET},
};
use crate::Float;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Leaves hold at most this many triangles.
pub const LEAF_SIZE: usize = 8;
/// Number of SAH split candidates sampled per range; keeps each level's
/// sweep near linear instead of quadratic in the range length.
pub const STEP_SIZE: usize = 10;

/// A node is a leaf or an interior node, fixed at construction. Children
/// are arena indices; interior nodes carry their children's exact bounds
/// so pruning never dereferences a child.
pub enum BvhNode {
    Leaf {
        start: usize,
        end: usize,
    },
    Interior {
        left: usize,
        right: usize,
        left_bounds: Bounds3f,
        right_bounds: Bounds3f,
    },
}

/// SAH-built bounding volume hierarchy over one mesh. The three index
/// permutations are owned here; leaves reference sub-ranges of the axis-0
/// array. Built serially, immutable afterwards.
pub struct BvhAccel {
    mesh: Arc<Mesh>,
    nodes: Arena<BvhNode>,
    root: usize,
    indices: [Vec<u32>; 3],
    bounds: Bounds3f,
}

struct Split {
    axis: usize,
    mid: usize,
    value: Float,
    tie_id: u32,
    cost: Float,
    left_bounds: Bounds3f,
    right_bounds: Bounds3f,
}

impl BvhAccel {
    pub fn build(mesh: Arc<Mesh>) -> BvhAccel {
        let n = mesh.num_triangles();
        let setup_start = Instant::now();

        let mut indices: [Vec<u32>; 3] = [
            (0..n as u32).collect(),
            (0..n as u32).collect(),
            (0..n as u32).collect(),
        ];

        let sort_start = Instant::now();
        for axis in 0..3 {
            let m = &mesh;
            // Ties broken by triangle id: the order must be total so
            // repeated builds and the partition routing agree exactly.
            indices[axis].sort_by(|&a, &b| {
                let ca = m.triangle_centroid(a as usize)[axis];
                let cb = m.triangle_centroid(b as usize)[axis];
                ca.partial_cmp(&cb)
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });
        }
        log::debug!(
            "bvh setup took {:.3}s, sorting {:.3}s",
            setup_start.elapsed().as_secs_f64(),
            sort_start.elapsed().as_secs_f64()
        );

        let bounds = range_bounds(&mesh, &indices[0]);
        let mut nodes = Arena::with_capacity(2 * n.max(1));
        let build_start = Instant::now();
        let root = build_range(&mesh, &mut indices, &mut nodes, 0, n);
        log::debug!(
            "bvh build of {} triangles took {:.3}s, {} nodes",
            n,
            build_start.elapsed().as_secs_f64(),
            nodes.len()
        );

        BvhAccel {
            mesh,
            nodes,
            root,
            indices,
            bounds,
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, index: usize) -> &BvhNode {
        self.nodes.get(index)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn indices(&self, axis: usize) -> &[u32] {
        &self.indices[axis]
    }

    pub fn world_bound(&self) -> &Bounds3f {
        &self.bounds
    }

    /// Whole-tree frustum test used for model level culling: the root's
    /// child boxes when there are two, the full bounds for a leaf root.
    pub fn intersect_frustum(&self, frustum: &Frustum) -> bool {
        match self.nodes.get(self.root) {
            BvhNode::Interior {
                left_bounds,
                right_bounds,
                ..
            } => {
                frustum_box_intersect(frustum, left_bounds)
                    || frustum_box_intersect(frustum, right_bounds)
            }
            BvhNode::Leaf { .. } => frustum_box_intersect(frustum, &self.bounds),
        }
    }

    /// Nearest hit over the whole tree. Both children are tested whenever
    /// their boxes are hit; `info` accumulates the globally closest
    /// accepted triangle.
    pub fn intersect_ray(&self, eye: &Vector3f, dir: &Vector3f, info: &mut IsectInfo) -> bool {
        self.intersect_node(self.root, eye, dir, info)
    }

    fn intersect_node(
        &self,
        node: usize,
        eye: &Vector3f,
        dir: &Vector3f,
        info: &mut IsectInfo,
    ) -> bool {
        match self.nodes.get(node) {
            BvhNode::Leaf { start, end } => self.intersect_leaf(*start, *end, eye, dir, info),
            BvhNode::Interior {
                left,
                right,
                left_bounds,
                right_bounds,
            } => {
                let mut ret = false;
                if left_bounds.intersect_ray(eye, dir) {
                    ret |= self.intersect_node(*left, eye, dir, info);
                }
                if right_bounds.intersect_ray(eye, dir) {
                    ret |= self.intersect_node(*right, eye, dir, info);
                }
                ret
            }
        }
    }

    fn intersect_leaf(
        &self,
        start: usize,
        end: usize,
        eye: &Vector3f,
        dir: &Vector3f,
        info: &mut IsectInfo,
    ) -> bool {
        let mut ret = false;
        for s in start..end {
            let index = self.indices[0][s] as usize;
            let [p0, p1, p2] = self.mesh.triangle_positions(index);
            if triangle_ray_intersect(eye, dir, &p0, &p1, &p2, info) {
                info.index = index;
                ret = true;
            }
        }
        ret
    }

    /// Any-hit within `(SLOP, max_time)`. Leaves bail on the first accepted
    /// triangle and the right subtree is skipped once the left reports one.
    pub fn shadow_test(&self, eye: &Vector3f, dir: &Vector3f, max_time: Float) -> bool {
        let mut info = IsectInfo::bounded(max_time);
        self.shadow_node(self.root, eye, dir, &mut info)
    }

    fn shadow_node(
        &self,
        node: usize,
        eye: &Vector3f,
        dir: &Vector3f,
        info: &mut IsectInfo,
    ) -> bool {
        match self.nodes.get(node) {
            BvhNode::Leaf { start, end } => {
                for s in *start..*end {
                    let index = self.indices[0][s] as usize;
                    let [p0, p1, p2] = self.mesh.triangle_positions(index);
                    if triangle_ray_intersect(eye, dir, &p0, &p1, &p2, info) {
                        return true;
                    }
                }
                false
            }
            BvhNode::Interior {
                left,
                right,
                left_bounds,
                right_bounds,
            } => {
                if left_bounds.intersect_ray(eye, dir) && self.shadow_node(*left, eye, dir, info) {
                    return true;
                }
                if right_bounds.intersect_ray(eye, dir) && self.shadow_node(*right, eye, dir, info)
                {
                    return true;
                }
                false
            }
        }
    }

    /// Shared descent for a coherent ray bundle. `intersected` is the
    /// active mask on entry; on return it reports, per ray, whether this
    /// subtree accepted a hit. A child subtree whose box misses the packet
    /// frustum is skipped for every ray with a single test; otherwise each
    /// still-active ray is box-tested individually before descending.
    pub fn intersect_packet(
        &self,
        packet: &Packet,
        infos: &mut [IsectInfo; RAYS_PER_PACKET],
        intersected: &mut [bool; RAYS_PER_PACKET],
    ) {
        self.packet_node(self.root, packet, infos, intersected);
    }

    fn packet_node(
        &self,
        node: usize,
        packet: &Packet,
        infos: &mut [IsectInfo; RAYS_PER_PACKET],
        intersected: &mut [bool; RAYS_PER_PACKET],
    ) {
        match self.nodes.get(node) {
            BvhNode::Leaf { start, end } => {
                for i in 0..RAYS_PER_PACKET {
                    if intersected[i] {
                        let ray = &packet.rays[i];
                        intersected[i] =
                            self.intersect_leaf(*start, *end, &ray.eye, &ray.dir, &mut infos[i]);
                    }
                }
            }
            BvhNode::Interior {
                left,
                right,
                left_bounds,
                right_bounds,
            } => {
                let mut left_active = [false; RAYS_PER_PACKET];
                let mut any_active_left = false;
                if frustum_box_intersect(&packet.frustum, left_bounds) {
                    for i in 0..RAYS_PER_PACKET {
                        if intersected[i] {
                            let ray = &packet.rays[i];
                            left_active[i] = left_bounds.intersect_ray(&ray.eye, &ray.dir);
                            any_active_left |= left_active[i];
                        }
                    }
                }
                if any_active_left {
                    self.packet_node(*left, packet, infos, &mut left_active);
                }

                let mut right_active = [false; RAYS_PER_PACKET];
                let mut any_active_right = false;
                if frustum_box_intersect(&packet.frustum, right_bounds) {
                    for i in 0..RAYS_PER_PACKET {
                        if intersected[i] {
                            let ray = &packet.rays[i];
                            right_active[i] = right_bounds.intersect_ray(&ray.eye, &ray.dir);
                            any_active_right |= right_active[i];
                        }
                    }
                }
                if any_active_right {
                    self.packet_node(*right, packet, infos, &mut right_active);
                }

                for i in 0..RAYS_PER_PACKET {
                    intersected[i] = left_active[i] || right_active[i];
                }
            }
        }
    }
}

/// Union of the bounding boxes of a run of triangles.
fn range_bounds(mesh: &Mesh, ids: &[u32]) -> Bounds3f {
    let mut bounds = Bounds3f::default();
    for &id in ids {
        for p in mesh.triangle_positions(id as usize).iter() {
            bounds.extend(p);
        }
    }
    bounds
}

fn build_range(
    mesh: &Mesh,
    indices: &mut [Vec<u32>; 3],
    nodes: &mut Arena<BvhNode>,
    start: usize,
    end: usize,
) -> usize {
    if end - start <= LEAF_SIZE {
        return nodes.alloc(BvhNode::Leaf { start, end });
    }

    let split = choose_split(mesh, indices, start, end);

    for axis in 0..3 {
        if axis != split.axis {
            partition_matching(
                mesh,
                &mut indices[axis][start..end],
                split.axis,
                split.value,
                split.tie_id,
                split.mid - start,
            );
        }
    }

    let left = build_range(mesh, indices, nodes, start, split.mid);
    let right = build_range(mesh, indices, nodes, split.mid, end);
    nodes.alloc(BvhNode::Interior {
        left,
        right,
        left_bounds: split.left_bounds,
        right_bounds: split.right_bounds,
    })
}

/// Sampled SAH sweep over all three axes. Prefix/suffix box scans give the
/// exact child bounds for every candidate; cost is surface area weighted by
/// triangle count on each side.
fn choose_split(mesh: &Mesh, indices: &[Vec<u32>; 3], start: usize, end: usize) -> Split {
    let len = end - start;
    let mut left_boxes = vec![Bounds3f::default(); len];
    let mut right_boxes = vec![Bounds3f::default(); len];
    let step = (len / STEP_SIZE).max(1);
    let mut best: Option<Split> = None;

    for axis in 0..3 {
        let ids = &indices[axis][start..end];

        left_boxes[0] = range_bounds(mesh, &ids[0..1]);
        right_boxes[len - 1] = range_bounds(mesh, &ids[len - 1..len]);
        for j in 1..len {
            left_boxes[j] = range_bounds(mesh, &ids[j..j + 1]).union(&left_boxes[j - 1]);
            right_boxes[len - j - 1] =
                range_bounds(mesh, &ids[len - j - 1..len - j]).union(&right_boxes[len - j]);
        }

        let mut j = 1;
        while j < len {
            let left_sa = left_boxes[j - 1].surface_area();
            let right_sa = right_boxes[j].surface_area();
            let cost = left_sa * j as Float + right_sa * (len - j) as Float;

            if best.as_ref().map_or(true, |b| cost < b.cost) {
                let val1 = mesh.triangle_centroid(ids[j - 1] as usize)[axis];
                let val2 = mesh.triangle_centroid(ids[j] as usize)[axis];
                // The midpoint may round down onto the left centroid; fall
                // back to the right value so the id tie-break decides.
                let mid_val = (val1 + val2) / 2.0;
                let value = if mid_val > val1 { mid_val } else { val2 };
                best = Some(Split {
                    axis,
                    mid: start + j,
                    value,
                    tie_id: ids[j],
                    cost,
                    left_bounds: left_boxes[j - 1],
                    right_bounds: right_boxes[j],
                });
            }
            j += step;
        }
    }

    // len > LEAF_SIZE >= 1, so the j = 1 candidate always exists.
    best.unwrap()
}

/// Routes one non-chosen axis's sub-range into the same left/right
/// membership the sorted split axis produced, preserving relative order on
/// both sides. `(value, id)` below the split cut goes left; anything else
/// goes right. A mismatch with the expected left length means the split
/// cut does not describe the sorted axis's partition - that corrupts every
/// downstream query, so debug builds abort.
pub fn partition_matching(
    mesh: &Mesh,
    ids: &mut [u32],
    axis: usize,
    split_value: Float,
    tie_id: u32,
    expected_left: usize,
) {
    let mut left = Vec::with_capacity(expected_left);
    let mut right = Vec::with_capacity(ids.len().saturating_sub(expected_left));
    for &id in ids.iter() {
        let val = mesh.triangle_centroid(id as usize)[axis];
        let left_part = if val != split_value {
            val < split_value
        } else {
            id < tie_id
        };
        if left_part {
            left.push(id);
        } else {
            right.push(id);
        }
    }

    debug_assert_eq!(
        left.len(),
        expected_left,
        "partition disagrees with the sorted axis"
    );

    ids[..left.len()].copy_from_slice(&left);
    ids[left.len()..].copy_from_slice(&right);
}
