use glam::Vec3;

/// Equirectangular placement: longitude and latitude in radians on the XY plane.
pub fn convert_lat_long_to_plane(latitude: f32, longitude: f32) -> Vec3 {
    Vec3::new(longitude.to_radians(), latitude.to_radians(), 0.0)
}

/// Point on the unit sphere. Latitude 0, longitude 0 faces +Z.
pub fn convert_lat_long_to_sphere(latitude: f32, longitude: f32) -> Vec3 {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    Vec3::new(lat.cos() * lon.sin(), lat.sin(), lat.cos() * lon.cos())
}
