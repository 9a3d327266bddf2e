use packtracer::core::geometry::{Ray, Vector3f};
use packtracer::core::intersect::IsectInfo;
use packtracer::core::material::Material;
use packtracer::core::mesh::Mesh;
use packtracer::core::radians;
use packtracer::core::transform::Quaternion;
use packtracer::shapes::triangle::TriangleVertex;
use packtracer::shapes::{Instance, Model, Sphere, Triangle};
use packtracer::Float;
use std::sync::Arc;

fn identity() -> Instance {
    Instance::default()
}

#[test]
fn test_sphere_nearest_hit() {
    let sphere = Sphere::new(1.0, Material::default(), identity());
    let ray = Ray::new(Vector3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));

    let mut info = IsectInfo::default();
    assert!(sphere.intersect_ray(&ray, &mut info));
    assert!((info.time - 2.0).abs() < 1e-5);

    let si = sphere.interaction(&ray, &info);
    assert!((si.normal.z + 1.0).abs() < 1e-5);
    assert!((si.point.z + 1.0).abs() < 1e-5);
}

#[test]
fn test_sphere_from_inside() {
    let sphere = Sphere::new(1.0, Material::default(), identity());
    let ray = Ray::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));

    // the near root is behind the slop guard; the far root wins
    let mut info = IsectInfo::default();
    assert!(sphere.intersect_ray(&ray, &mut info));
    assert!((info.time - 1.0).abs() < 1e-5);
}

#[test]
fn test_sphere_shadow_range() {
    let sphere = Sphere::new(1.0, Material::default(), identity());
    let ray = Ray::new(Vector3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));

    assert!(!sphere.shadow_test(&ray, 1.5));
    assert!(sphere.shadow_test(&ray, 3.0));
    assert!(sphere.shadow_test(&ray, Float::INFINITY));
}

#[test]
fn test_sphere_instanced() {
    // radius 1 sphere scaled by 2 and moved to (2, 0, 0); hit times stay
    // world-comparable through the affine map
    let instance = Instance::new(
        Vector3f::new(2.0, 0.0, 0.0),
        Quaternion::default(),
        Vector3f::new(2.0, 2.0, 2.0),
    );
    let sphere = Sphere::new(1.0, Material::default(), instance);
    let ray = Ray::new(Vector3f::new(2.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));

    let mut info = IsectInfo::default();
    assert!(sphere.intersect_ray(&ray, &mut info));
    assert!((info.time - 3.0).abs() < 1e-4);

    let si = sphere.interaction(&ray, &info);
    assert!((si.point.z + 2.0).abs() < 1e-4);
    assert!((si.normal.z + 1.0).abs() < 1e-4);
}

#[test]
fn test_standalone_triangle() {
    let n = Vector3f::new(0.0, 0.0, 1.0);
    let triangle = Triangle::new(
        [
            TriangleVertex {
                position: Vector3f::new(-1.0, -1.0, 0.0),
                normal: n,
            },
            TriangleVertex {
                position: Vector3f::new(1.0, -1.0, 0.0),
                normal: n,
            },
            TriangleVertex {
                position: Vector3f::new(0.0, 1.0, 0.0),
                normal: n,
            },
        ],
        Material::default(),
        identity(),
    );

    let ray = Ray::new(Vector3f::new(0.0, -0.2, 5.0), Vector3f::new(0.0, 0.0, -1.0));
    let mut info = IsectInfo::default();
    assert!(triangle.intersect_ray(&ray, &mut info));
    assert!((info.time - 5.0).abs() < 1e-4);

    // the interpolated normal flips toward the incoming ray
    let si = triangle.interaction(&ray, &info);
    assert!(si.normal.z > 0.0);

    let behind = Ray::new(Vector3f::new(0.0, -0.2, 5.0), Vector3f::new(0.0, 0.0, 1.0));
    let mut info = IsectInfo::default();
    assert!(!triangle.intersect_ray(&behind, &mut info));
}

#[test]
fn test_model_instanced() {
    // unit plane raised to y = 2 by its instance transform
    let instance = Instance::new(
        Vector3f::new(0.0, 2.0, 0.0),
        Quaternion::default(),
        Vector3f::new(1.0, 1.0, 1.0),
    );
    let mut model = Model::new(Arc::new(Mesh::plane(4)), Material::default(), instance);
    model.make_bounding_volume();

    let ray = Ray::new(
        Vector3f::new(0.13, 5.0, 0.21),
        Vector3f::new(0.0, -1.0, 0.0),
    );
    let mut info = IsectInfo::default();
    assert!(model.intersect_ray(&ray, &mut info));
    assert!((info.time - 3.0).abs() < 1e-4);

    let si = model.interaction(&ray, &info);
    assert!((si.normal.y - 1.0).abs() < 1e-4);
    assert!((si.point.y - 2.0).abs() < 1e-4);

    assert!(model.shadow_test(&ray, 4.0));
    assert!(!model.shadow_test(&ray, 2.5));
}

#[test]
fn test_model_rotated() {
    // cube spun about y; a straight-on ray still hits the front face at
    // the rotated distance
    let instance = Instance::new(
        Vector3f::new(0.0, 0.0, 0.0),
        Quaternion::from_axis_angle(&Vector3f::new(0.0, 1.0, 0.0), radians(45.0)),
        Vector3f::new(1.0, 1.0, 1.0),
    );
    let mut model = Model::new(Arc::new(Mesh::cube()), Material::default(), instance);
    model.make_bounding_volume();

    let ray = Ray::new(Vector3f::new(0.2, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
    let mut info = IsectInfo::default();
    assert!(model.intersect_ray(&ray, &mut info));

    // the spun face satisfies x + z = sqrt(2)/2 in the cross section
    let expected = 5.0 - ((2.0 as Float).sqrt() / 2.0 - 0.2);
    assert!((info.time - expected).abs() < 1e-3);
}
