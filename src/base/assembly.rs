use russell_lab::{Matrix, Vector};

/// Assembles local vector into global vector
///
/// ```text
/// R[loc[l]] += fact · r[l]   for every l with an equation number
/// ```
///
/// # Output
///
/// * `rr_global` -- is the global vector R with length = `n_equation`
///
/// # Input
///
/// * `r_local` -- is the local vector r with length = `n_dof_local`
/// * `loc` -- holds the equation number of each local DOF; None indicates a constrained DOF
///   without an equation (such DOFs are skipped)
/// * `fact` -- is a multiplier
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_vector(rr_global: &mut Vector, r_local: &Vector, loc: &[Option<usize>], fact: f64) {
    for (l, eq) in loc.iter().enumerate() {
        if let Some(g) = eq {
            rr_global[*g] += fact * r_local[l];
        }
    }
}

/// Assembles local matrix into dense global matrix
///
/// ```text
/// K[loc[l]][loc[ll]] += fact · k[l][ll]   for every l and ll with equation numbers
/// ```
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
#[inline]
pub fn assemble_matrix(kk_global: &mut Matrix, kk_local: &Matrix, loc: &[Option<usize>], fact: f64) {
    for (l, eq) in loc.iter().enumerate() {
        if let Some(g) = eq {
            for (ll, eq_eq) in loc.iter().enumerate() {
                if let Some(gg) = eq_eq {
                    let value = kk_global.get(*g, *gg) + fact * kk_local.get(l, ll);
                    kk_global.set(*g, *gg, value);
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{assemble_matrix, assemble_vector};
    use russell_lab::{mat_approx_eq, vec_approx_eq, Matrix, Vector};

    #[test]
    fn assemble_vector_works() {
        let mut rr = Vector::new(3);
        let r1 = Vector::from(&[1.0, 2.0]);
        let r2 = Vector::from(&[10.0, 20.0]);
        assemble_vector(&mut rr, &r1, &[None, Some(0)], 1.0);
        assemble_vector(&mut rr, &r2, &[Some(0), Some(2)], 2.0);
        let correct = Vector::from(&[22.0, 0.0, 40.0]);
        vec_approx_eq(&rr, &correct, 1e-15);
    }

    #[test]
    fn assemble_matrix_works() {
        //  0 ---- 1 ---- 2
        //   [k1]    [k2]      node 0 is fixed
        let mut kk = Matrix::new(2, 2);
        let k1 = Matrix::from(&[[1.0, -1.0], [-1.0, 1.0]]);
        let k2 = Matrix::from(&[[3.0, -3.0], [-3.0, 3.0]]);
        assemble_matrix(&mut kk, &k1, &[None, Some(0)], 1.0);
        assemble_matrix(&mut kk, &k2, &[Some(0), Some(1)], 1.0);
        let correct = Matrix::from(&[[4.0, -3.0], [-3.0, 3.0]]);
        mat_approx_eq(&kk, &correct, 1e-15);
    }
}
