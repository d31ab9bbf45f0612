//! Matrix layout of a labeled contraction.
//!
//! A contraction `C = A * B` over negative (summed) labels becomes the
//! matrix product `C(dleft, dright) = A(dleft, dmid) * B(dmid, dright)` once
//! A is ordered `[free, summed]` and B `[summed, free]`.

use crate::strides::is_trivial;

/// How to lay out the operands of a contraction as matrices.
#[derive(Debug, Clone)]
pub struct ContractionProperties {
    /// Free axes of A, in A's order.
    pub free_a: Vec<usize>,

    /// Free axes of B, in B's order.
    pub free_b: Vec<usize>,

    /// Product of A's free extents.
    pub dleft: usize,

    /// Product of summed extents.
    pub dmid: usize,

    /// Product of B's free extents.
    pub dright: usize,

    /// Axis order for A: `[free..., summed...]`
    pub perm_a: Vec<usize>,

    /// Axis order for B: `[summed..., free...]`, summed axes in A's order
    pub perm_b: Vec<usize>,

    pub permute_a: bool,

    pub permute_b: bool,

    /// Labels of the matrix product's axes, A's free axes then B's
    pub output_labels: Vec<i32>,
}

impl ContractionProperties {
    /// Lay out a contraction given both operands' labels and extents.
    ///
    /// # Example
    ///
    /// ```
    /// use ndtensors_dense::contract::ContractionProperties;
    ///
    /// // C[i,k] = A[i,j] * B[j,k]
    /// let props = ContractionProperties::compute(
    ///     &[1, -1], &[2, 3],  // A is 2x3
    ///     &[-1, 2], &[3, 4],  // B is 3x4
    /// );
    ///
    /// assert_eq!(props.dleft, 2);
    /// assert_eq!(props.dmid, 3);
    /// assert_eq!(props.dright, 4);
    /// ```
    pub fn compute(
        labels_a: &[i32],
        shape_a: &[usize],
        labels_b: &[i32],
        shape_b: &[usize],
    ) -> Self {
        let (mut summed_a, mut summed_b) = (Vec::new(), Vec::new());
        let mut free_a = Vec::new();
        for (i, &la) in labels_a.iter().enumerate() {
            match labels_b.iter().position(|&lb| la < 0 && lb == la) {
                Some(j) => {
                    summed_a.push(i);
                    summed_b.push(j);
                }
                None => free_a.push(i),
            }
        }
        let free_b: Vec<usize> = (0..labels_b.len())
            .filter(|j| !summed_b.contains(j))
            .collect();

        let extent_product = |axes: &[usize], shape: &[usize]| -> usize {
            axes.iter().map(|&i| shape[i]).product()
        };
        let dleft = extent_product(&free_a[..], shape_a);
        let dmid = extent_product(&summed_a[..], shape_a);
        let dright = extent_product(&free_b[..], shape_b);

        let perm_a: Vec<usize> = free_a.iter().chain(&summed_a).copied().collect();
        let perm_b: Vec<usize> = summed_b.iter().chain(&free_b).copied().collect();

        let output_labels = free_a
            .iter()
            .map(|&i| labels_a[i])
            .chain(free_b.iter().map(|&j| labels_b[j]))
            .collect();

        Self {
            permute_a: !is_trivial(&perm_a),
            permute_b: !is_trivial(&perm_b),
            free_a,
            free_b,
            dleft,
            dmid,
            dright,
            perm_a,
            perm_b,
            output_labels,
        }
    }

    /// Every axis is summed; the result is a scalar.
    pub fn is_full_contraction(&self) -> bool {
        self.free_a.is_empty() && self.free_b.is_empty()
    }
}
